use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// The three payroll line kinds an entry can expand into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayCodeKind {
    Reg,
    Ot,
    Subsistence,
}

impl PayCodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            PayCodeKind::Reg => "REG",
            PayCodeKind::Ot => "OT",
            PayCodeKind::Subsistence => "SUBSISTENCE",
        }
    }
}

/// Numeric pay-code strings expected by the payroll import tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCodeMap {
    #[serde(default = "default_reg")]
    pub reg: String,
    #[serde(default = "default_ot")]
    pub ot: String,
    #[serde(default = "default_subsistence")]
    pub subsistence: String,
}

fn default_reg() -> String {
    "211".to_string()
}
fn default_ot() -> String {
    "212".to_string()
}
fn default_subsistence() -> String {
    "261".to_string()
}

impl Default for PayCodeMap {
    fn default() -> Self {
        Self {
            reg: default_reg(),
            ot: default_ot(),
            subsistence: default_subsistence(),
        }
    }
}

impl PayCodeMap {
    pub fn code(&self, kind: PayCodeKind) -> &str {
        match kind {
            PayCodeKind::Reg => &self.reg,
            PayCodeKind::Ot => &self.ot,
            PayCodeKind::Subsistence => &self.subsistence,
        }
    }

    /// Replace any of the three codes independently.
    pub fn with_overrides(
        mut self,
        reg: Option<&str>,
        ot: Option<&str>,
        subsistence: Option<&str>,
    ) -> Self {
        if let Some(v) = reg {
            self.reg = v.trim().to_string();
        }
        if let Some(v) = ot {
            self.ot = v.trim().to_string();
        }
        if let Some(v) = subsistence {
            self.subsistence = v.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        for kind in [PayCodeKind::Reg, PayCodeKind::Ot, PayCodeKind::Subsistence] {
            if self.code(kind).trim().is_empty() {
                return Err(AppError::Config(format!(
                    "pay code for {} must not be empty",
                    kind.label()
                )));
            }
        }
        Ok(())
    }
}
