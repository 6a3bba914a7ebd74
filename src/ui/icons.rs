//! Shared UI icons and emojis.
//!
//! Each icon carries a plain-text fallback for terminals without emoji support.

use console::Emoji;

// Notification indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[i]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!]");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "*");

// Habit state markers
pub static DONE: Emoji<'_, '_> = Emoji("✔", "x");
pub static PENDING: Emoji<'_, '_> = Emoji("○", " ");
pub static STREAK: Emoji<'_, '_> = Emoji("🔥 ", "");

// Views
pub static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "");
pub static PROGRESS: Emoji<'_, '_> = Emoji("📊 ", "");
