//! App state - pure data structure with no I/O logic

use std::collections::{BTreeMap, VecDeque};

use alloy_primitives::U256;

use crate::config::MarketConfig;
use crate::constants::PLACEHOLDER_CONTENT_ID;
use crate::messages::ui_events::{Field, Form, InputMode};
use crate::messages::RenderState;
use crate::models::{
    ActivityEntry, Operation, SalePrice, SessionState, TokenId, TokenView, UploadSlot,
};

/// Text typed into every form, one entry per field
#[derive(Debug, Clone)]
pub struct FormInputs {
    values: Vec<Vec<String>>,
}

impl Default for FormInputs {
    fn default() -> Self {
        FormInputs {
            values: Form::ALL
                .iter()
                .map(|form| vec![String::new(); form.fields().len()])
                .collect(),
        }
    }
}

impl FormInputs {
    pub fn get(&self, form: Form, index: usize) -> &str {
        self.values[form.index()]
            .get(index)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn get_mut(&mut self, form: Form, index: usize) -> Option<&mut String> {
        self.values[form.index()].get_mut(index)
    }

    pub fn set(&mut self, form: Form, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.get_mut(form, index) {
            *slot = value.into();
        }
    }

    /// Value of `field` in `form`, empty if the form has no such field
    pub fn field(&self, form: Form, field: Field) -> &str {
        form.fields()
            .iter()
            .position(|f| *f == field)
            .map(|i| self.get(form, i))
            .unwrap_or("")
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub config: MarketConfig,

    // Session
    pub session: SessionState,
    pub total_tokens: U256,
    pub image_content_id: String,

    // Forms
    pub active_form: Form,
    pub selected_field: usize,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub inputs: FormInputs,

    // Upload
    pub upload: UploadSlot,
    /// (request id, read id) of the upload being minted
    pub uploading: Option<(u64, u64)>,

    // Query results, each tagged with the token it belongs to
    pub token_view: Option<TokenView>,
    pub sale_price: Option<SalePrice>,
    pub requested_token: Option<TokenId>,
    pub requested_price: Option<TokenId>,

    // Requests
    pub next_request_id: u64,
    pub pending: BTreeMap<u64, Operation>,

    // Activity panel
    pub activity: VecDeque<ActivityEntry>,
    pub activity_scroll: u16,

    // Popups
    pub show_help: bool,
    pub alert: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MarketConfig::default())
    }
}

impl AppState {
    pub fn new(config: MarketConfig) -> Self {
        AppState {
            config,
            session: SessionState::Connecting,
            total_tokens: U256::ZERO,
            image_content_id: String::from(PLACEHOLDER_CONTENT_ID),
            active_form: Form::Upload,
            selected_field: 0,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            inputs: FormInputs::default(),
            upload: UploadSlot::Empty,
            uploading: None,
            token_view: None,
            sale_price: None,
            requested_token: None,
            requested_price: None,
            next_request_id: 1,
            pending: BTreeMap::new(),
            activity: VecDeque::new(),
            activity_scroll: 0,
            show_help: false,
            alert: None,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        self.inputs.get(self.active_form, self.selected_field)
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        self.inputs.get_mut(self.active_form, self.selected_field)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            session: self.session.clone(),
            total_tokens: self.total_tokens,
            image_url: self.config.gateway_url(&self.image_content_id),
            active_form: self.active_form,
            selected_field: self.selected_field,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            inputs: self.inputs.clone(),
            upload_status: self.upload.describe(),
            upload_ready: self.upload.is_ready(),
            token_view: self.token_view.clone(),
            sale_price: self.sale_price.clone(),
            pending: self.pending.values().copied().collect(),
            activity: self.activity.iter().cloned().collect(),
            activity_scroll: self.activity_scroll,
            show_help: self.show_help,
            alert: self.alert.clone(),
        }
    }
}
