//! Render state - data structure sent from App layer to UI for rendering

use alloy_primitives::U256;

use crate::app::state::FormInputs;
use crate::messages::ui_events::{Form, InputMode};
use crate::models::{ActivityEntry, Operation, SalePrice, SessionState, TokenView};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Session
    pub session: SessionState,
    pub total_tokens: U256,

    /// Gateway URL of the most recently known content identifier
    pub image_url: String,

    // Forms
    pub active_form: Form,
    pub selected_field: usize,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub inputs: FormInputs,

    // Upload form
    pub upload_status: String,
    pub upload_ready: bool,

    // Query results
    pub token_view: Option<TokenView>,
    pub sale_price: Option<SalePrice>,

    /// Operations still waiting on the network
    pub pending: Vec<Operation>,

    // Activity panel
    pub activity: Vec<ActivityEntry>,
    pub activity_scroll: u16,

    // Popups
    pub show_help: bool,
    pub alert: Option<String>,
}
