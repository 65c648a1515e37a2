//! Command handlers - business logic for processing UI events

use std::path::PathBuf;

use alloy_primitives::{Address, U256};

use crate::app::AppState;
use crate::constants::MAX_ACTIVITY;
use crate::messages::ui_events::{Field, Form, InputMode};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{
    parse_amount, ActivityEntry, Operation, SessionState, TokenId, UploadSlot,
};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_form(&mut self) {
        self.switch_form(self.active_form.next());
    }

    pub fn prev_form(&mut self) {
        self.switch_form(self.active_form.prev());
    }

    fn switch_form(&mut self, form: Form) {
        self.active_form = form;
        self.selected_field = 0;
        self.input_mode = InputMode::Normal;
        self.cursor_position = self.current_input().len();
    }

    pub fn next_field(&mut self) {
        let count = self.active_form.fields().len();
        self.selected_field = (self.selected_field + 1) % count;
        self.cursor_position = self.current_input().len();
    }

    pub fn prev_field(&mut self) {
        let count = self.active_form.fields().len();
        self.selected_field = self.selected_field.checked_sub(1).unwrap_or(count - 1);
        self.cursor_position = self.current_input().len();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Activity scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.activity_scroll = self.activity_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.activity_scroll = self.activity_scroll.saturating_add(1);
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ========================
    // Requests
    // ========================

    fn track(&mut self, operation: Operation) -> u64 {
        let id = self.next_id();
        self.pending.insert(id, operation);
        id
    }

    /// First command of every run
    pub fn init_session(&mut self) -> NetworkCommand {
        self.session = SessionState::Connecting;
        let id = self.track(Operation::InitSession);
        NetworkCommand::InitSession { id }
    }

    fn fetch_total_tokens(&mut self) -> NetworkCommand {
        let id = self.track(Operation::TotalTokens);
        NetworkCommand::FetchTotalTokens { id }
    }

    /// Session account, once the ledger has handed one out
    fn sender(&self) -> Option<Address> {
        let account = self.session.account();
        if account.is_none() {
            tracing::warn!(form = self.active_form.title(), "Ignoring submission, session not ready");
        }
        account
    }

    fn amount_field(&self, form: Form, field: Field) -> Option<U256> {
        let text = self.inputs.field(form, field);
        let amount = parse_amount(text);
        if amount.is_none() {
            tracing::warn!(form = form.title(), field = field.label(), input = text, "Not a number");
        }
        amount
    }

    /// Start reading the file named in the Upload form
    pub fn select_file(&mut self) -> Option<NetworkCommand> {
        self.stop_editing();

        let input = self.inputs.field(Form::Upload, Field::FilePath).trim().to_string();
        if input.is_empty() {
            return None;
        }
        // Expand ~ to home directory
        let expanded = if input.starts_with('~') {
            match dirs::home_dir() {
                Some(home) => input.replacen('~', &home.to_string_lossy(), 1),
                None => input,
            }
        } else {
            input
        };
        let path = PathBuf::from(expanded);

        let id = self.track(Operation::ReadFile);
        if let UploadSlot::Reading { id: old, .. } = &self.upload {
            self.pending.remove(old);
        }
        // Last selection wins
        self.upload = UploadSlot::Reading {
            id,
            path: path.clone(),
        };
        Some(NetworkCommand::ReadFile { id, path })
    }

    /// Submit whichever form is active
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if self.input_mode == InputMode::Editing {
            self.stop_editing();
        }
        match self.active_form {
            Form::Upload => self.submit_upload(),
            Form::GetToken => self.fetch_token(),
            Form::SellToken => self.list_for_sale(),
            Form::SellingPrice => self.fetch_sale_price(),
            Form::BuyToken => self.purchase(),
        }
    }

    /// Only possible once the selected file has been read completely
    pub fn submit_upload(&mut self) -> Option<NetworkCommand> {
        let from = self.sender()?;
        let (read_id, buffer) = match &self.upload {
            UploadSlot::Ready { id, buffer, .. } => (*id, buffer.clone()),
            other => {
                tracing::debug!(upload = %other.describe(), "Upload not ready");
                return None;
            }
        };
        let id = self.track(Operation::Upload);
        self.uploading = Some((id, read_id));
        Some(NetworkCommand::UploadAndMint { id, from, buffer })
    }

    pub fn fetch_token(&mut self) -> Option<NetworkCommand> {
        self.sender()?;
        let token_id: TokenId = self.amount_field(Form::GetToken, Field::TokenId)?;
        self.requested_token = Some(token_id);
        let id = self.track(Operation::FetchToken);
        Some(NetworkCommand::FetchToken { id, token_id })
    }

    pub fn list_for_sale(&mut self) -> Option<NetworkCommand> {
        let from = self.sender()?;
        let token_id = self.amount_field(Form::SellToken, Field::TokenId)?;
        let price = self.amount_field(Form::SellToken, Field::Price)?;
        let id = self.track(Operation::ListForSale);
        Some(NetworkCommand::ListForSale {
            id,
            from,
            token_id,
            price,
        })
    }

    pub fn purchase(&mut self) -> Option<NetworkCommand> {
        let from = self.sender()?;
        let token_id = self.amount_field(Form::BuyToken, Field::TokenId)?;
        let price = self.amount_field(Form::BuyToken, Field::Price)?;
        let id = self.track(Operation::Purchase);
        Some(NetworkCommand::Purchase {
            id,
            from,
            token_id,
            price,
        })
    }

    pub fn fetch_sale_price(&mut self) -> Option<NetworkCommand> {
        self.sender()?;
        let token_id = self.amount_field(Form::SellingPrice, Field::TokenId)?;
        self.requested_price = Some(token_id);
        let id = self.track(Operation::FetchSalePrice);
        Some(NetworkCommand::FetchSalePrice { id, token_id })
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network response; returns a follow-up command when one is due
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        if response.is_terminal() {
            self.pending.remove(&response.id());
        }

        match response {
            NetworkResponse::SessionReady { account, .. } => {
                self.session = SessionState::Ready { account };
                Some(self.fetch_total_tokens())
            }
            NetworkResponse::SessionFailed { message, .. } => {
                self.alert = Some(format!("Failed to load ledger session\n\n{}", message));
                self.session = SessionState::Failed { message };
                None
            }
            NetworkResponse::FileLoaded { id, path, buffer } => {
                // A newer selection supersedes this read
                if matches!(self.upload, UploadSlot::Reading { id: current, .. } if current == id) {
                    self.upload = UploadSlot::Ready { id, path, buffer };
                }
                None
            }
            NetworkResponse::Uploaded { content_id, .. } => {
                self.image_content_id = content_id;
                None
            }
            NetworkResponse::Minted {
                id,
                content_id,
                tx_hash,
            } => {
                if let Some((request_id, read_id)) = self.uploading {
                    if request_id == id {
                        self.uploading = None;
                        if matches!(self.upload, UploadSlot::Ready { id: ready, .. } if ready == read_id)
                        {
                            self.upload = UploadSlot::Empty;
                        }
                    }
                }
                self.record_activity(Operation::Mint, content_id, tx_hash);
                Some(self.fetch_total_tokens())
            }
            NetworkResponse::TotalTokens { count, .. } => {
                self.total_tokens = count;
                None
            }
            NetworkResponse::Token { view, .. } => {
                if self.requested_token == Some(view.token_id) {
                    self.image_content_id = view.content_id.clone();
                    self.token_view = Some(view);
                } else {
                    tracing::debug!(token_id = %view.token_id, "Dropping superseded token view");
                }
                None
            }
            NetworkResponse::TransactionSent {
                operation,
                token_id,
                tx_hash,
                ..
            } => {
                self.record_activity(operation, format!("token {}", token_id), tx_hash);
                None
            }
            NetworkResponse::SalePrice { price, .. } => {
                if self.requested_price == Some(price.token_id) {
                    self.sale_price = Some(price);
                } else {
                    tracing::debug!(token_id = %price.token_id, "Dropping superseded sale price");
                }
                None
            }
            NetworkResponse::Failed { id, operation, .. } => {
                // Already logged by the network layer; only unblock the upload form
                if operation == Operation::ReadFile
                    && matches!(self.upload, UploadSlot::Reading { id: current, .. } if current == id)
                {
                    self.upload = UploadSlot::Empty;
                }
                if matches!(self.uploading, Some((request_id, _)) if request_id == id) {
                    self.uploading = None;
                }
                None
            }
        }
    }

    fn record_activity(
        &mut self,
        operation: Operation,
        detail: String,
        tx_hash: alloy_primitives::B256,
    ) {
        if self.activity.len() >= MAX_ACTIVITY {
            self.activity.pop_back();
        }
        self.activity.push_front(ActivityEntry {
            operation,
            detail,
            tx_hash,
            timestamp: chrono::Utc::now(),
        });
        // Newest entry sits at the top
        self.activity_scroll = 0;
    }
}
