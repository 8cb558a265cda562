//! Color theme constants for the BlogHub UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Header text color - white for the logo
pub const COLOR_HEADER: Color = Color::White;

/// Active elements (selected card, focused field, signed-in user)
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Background for input areas
pub const COLOR_INPUT_BG: Color = Color::Rgb(20, 20, 30);

/// Placeholder blocks shown while the listing loads
pub const COLOR_SKELETON: Color = Color::Rgb(45, 45, 55);

// ============================================================================
// Content Colors
// ============================================================================

/// Category badges and links - blue #007ACC
pub const COLOR_LINK: Color = Color::Rgb(0, 122, 204);

/// Comments the server has not confirmed yet
pub const COLOR_PENDING: Color = Color::Yellow;

/// Error text
pub const COLOR_ERROR: Color = Color::Red;

// ============================================================================
// Dialog Colors
// ============================================================================

/// Background color for the auth dialogs
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);
