//! Instruments — add-instrument form plus the list fetched on mount.

use market_agent_core::{Ack, ApiError, Instrument, NewInstrument};

use super::Remote;

pub const SUCCESS_MESSAGE: &str = "Instrument added successfully.";
pub const REQUIRED_MESSAGE: &str = "Symbol and Instrument ID are required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Symbol,
    InstrumentId,
    Kind,
    Currency,
    Source,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Symbol,
        FormField::InstrumentId,
        FormField::Kind,
        FormField::Currency,
        FormField::Source,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Symbol => "Symbol",
            FormField::InstrumentId => "Instrument ID",
            FormField::Kind => "Type",
            FormField::Currency => "Currency",
            FormField::Source => "Source",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Symbol => "GGAL.BA",
            FormField::InstrumentId => "ISIN-AR-GGAL",
            _ => "",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, FormField::Symbol | FormField::InstrumentId)
    }

    fn position(self) -> usize {
        FormField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> FormField {
        FormField::ALL[(self.position() + 1) % FormField::ALL.len()]
    }

    pub fn prev(self) -> FormField {
        let n = FormField::ALL.len();
        FormField::ALL[(self.position() + n - 1) % n]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentKind {
    Equity,
    Bond,
}

impl InstrumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InstrumentKind::Equity => "equity",
            InstrumentKind::Bond => "bond",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            InstrumentKind::Equity => InstrumentKind::Bond,
            InstrumentKind::Bond => InstrumentKind::Equity,
        }
    }
}

/// Controlled add-instrument form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentForm {
    pub symbol: String,
    pub instrument_id: String,
    pub kind: InstrumentKind,
    pub currency: String,
    pub source: String,
    pub focus: FormField,
}

impl Default for InstrumentForm {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            instrument_id: String::new(),
            kind: InstrumentKind::Equity,
            currency: "ARS".to_string(),
            source: "yfinance".to_string(),
            focus: FormField::Symbol,
        }
    }
}

impl InstrumentForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Symbol => &self.symbol,
            FormField::InstrumentId => &self.instrument_id,
            FormField::Kind => self.kind.as_str(),
            FormField::Currency => &self.currency,
            FormField::Source => &self.source,
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Symbol => Some(&mut self.symbol),
            FormField::InstrumentId => Some(&mut self.instrument_id),
            FormField::Kind => None,
            FormField::Currency => Some(&mut self.currency),
            FormField::Source => Some(&mut self.source),
        }
    }

    /// Type a character into the focused field. On the type selector a space
    /// toggles equity/bond.
    pub fn insert_char(&mut self, c: char) {
        if self.focus == FormField::Kind {
            if c == ' ' {
                self.kind = self.kind.toggle();
            }
            return;
        }
        if let Some(text) = self.text_mut(self.focus) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut(self.focus) {
            text.pop();
        }
    }

    pub fn toggle_kind(&mut self) {
        if self.focus == FormField::Kind {
            self.kind = self.kind.toggle();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Submittable only with both required fields non-blank.
    pub fn can_submit(&self) -> bool {
        !self.symbol.trim().is_empty() && !self.instrument_id.trim().is_empty()
    }

    /// Creation body, or `None` while a required field is blank.
    pub fn to_request(&self) -> Option<NewInstrument> {
        if !self.can_submit() {
            return None;
        }
        Some(NewInstrument {
            symbol: self.symbol.trim().to_string(),
            instrument_id: self.instrument_id.trim().to_string(),
            kind: self.kind.as_str().to_string(),
            currency: self.currency.trim().to_string(),
            source: self.source.trim().to_string(),
        })
    }
}

/// Inline outcome message under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct InstrumentsState {
    pub form: InstrumentForm,
    pub list: Remote<Vec<Instrument>>,
    pub notice: Option<Notice>,
    pub submitting: bool,
}

impl Default for InstrumentsState {
    fn default() -> Self {
        Self::new()
    }
}

impl InstrumentsState {
    pub fn new() -> Self {
        Self {
            form: InstrumentForm::default(),
            list: Remote::Loading,
            notice: None,
            submitting: false,
        }
    }

    /// Validate and hand back the body to POST. Blank required fields set an
    /// error notice instead.
    pub fn submit(&mut self) -> Option<NewInstrument> {
        self.notice = None;
        match self.form.to_request() {
            Some(body) => {
                self.submitting = true;
                Some(body)
            }
            None => {
                self.notice = Some(Notice::Error(REQUIRED_MESSAGE.to_string()));
                None
            }
        }
    }

    /// Record the POST outcome. The form and the list are left as they are.
    pub fn apply_added(&mut self, result: Result<Ack, ApiError>) {
        self.submitting = false;
        self.notice = Some(match result {
            Ok(Ack { ok: true }) => Notice::Success(SUCCESS_MESSAGE.to_string()),
            Ok(Ack { ok: false }) => Notice::Error("Backend rejected the instrument.".to_string()),
            Err(e) => Notice::Error(e.to_string()),
        });
    }
}
