//! Color theme constants for the qchat UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the focused panel
pub const COLOR_BORDER_FOCUSED: Color = Color::White;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Background of the selected sidebar row
pub const COLOR_SELECTED_BG: Color = Color::Rgb(40, 44, 60);

// ============================================================================
// Message Colors
// ============================================================================

/// Label of user messages
pub const COLOR_USER: Color = Color::Rgb(0, 122, 204); // blue #007ACC

/// Label of assistant messages
pub const COLOR_ASSISTANT: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Failed messages and form errors
pub const COLOR_ERROR: Color = Color::Red;

/// Informational notices
pub const COLOR_NOTICE: Color = Color::LightGreen;

/// Spinner while waiting on the backend
pub const COLOR_SPINNER: Color = Color::Cyan;
