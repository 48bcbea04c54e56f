use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::budgets::budget_model::BudgetSetting;
use crate::budgets::budget_store::KeyValueStore;
use crate::errors::{Error, Result, ValidationError};

pub const MONTHLY_BUDGET_PREFIX: &str = "budget_";
pub const DAILY_SET_BUDGET_PREFIX: &str = "dailyset_";

/// Per-application budget settings over an injected key/value store.
///
/// Monthly budgets fall back to the configured defaults, daily set budgets
/// to zero. Nothing is ever deleted here.
pub struct BudgetSettingsService<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
    defaults: HashMap<String, f64>,
}

impl<S: KeyValueStore + ?Sized> BudgetSettingsService<S> {
    pub fn new(store: Arc<S>, defaults: HashMap<String, f64>) -> Self {
        BudgetSettingsService { store, defaults }
    }

    fn read_number(&self, key: &str) -> Result<Option<f64>> {
        Ok(self
            .store
            .get(key)?
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite()))
    }

    pub fn monthly_budget(&self, app: &str) -> Result<f64> {
        let stored = self.read_number(&format!("{MONTHLY_BUDGET_PREFIX}{app}"))?;
        Ok(stored.unwrap_or_else(|| self.defaults.get(app).copied().unwrap_or(0.0)))
    }

    pub fn daily_set_budget(&self, app: &str) -> Result<f64> {
        let stored = self.read_number(&format!("{DAILY_SET_BUDGET_PREFIX}{app}"))?;
        Ok(stored.unwrap_or(0.0))
    }

    pub fn setting(&self, app: &str) -> Result<BudgetSetting> {
        Ok(BudgetSetting {
            monthly_budget: self.monthly_budget(app)?,
            daily_set_budget: self.daily_set_budget(app)?,
        })
    }

    pub fn settings_for<'a, I>(&self, apps: I) -> Result<HashMap<String, BudgetSetting>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        apps.into_iter()
            .map(|app| Ok((app.to_string(), self.setting(app)?)))
            .collect()
    }

    fn validate(value: f64, what: &str) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "{what} must be a non-negative number, got {value}"
            ))));
        }
        Ok(())
    }

    pub fn set_monthly_budget(&self, app: &str, value: f64) -> Result<()> {
        Self::validate(value, "Monthly budget")?;
        self.store
            .set(&format!("{MONTHLY_BUDGET_PREFIX}{app}"), &value.to_string())
    }

    pub fn set_daily_set_budget(&self, app: &str, value: f64) -> Result<()> {
        Self::validate(value, "Daily set budget")?;
        self.store
            .set(&format!("{DAILY_SET_BUDGET_PREFIX}{app}"), &value.to_string())
    }

    /// Apply a partial edit. Both values are validated, then written as one
    /// unit, so a failed write leaves neither value changed.
    pub fn update(
        &self,
        app: &str,
        monthly_budget: Option<f64>,
        daily_set_budget: Option<f64>,
    ) -> Result<BudgetSetting> {
        if let Some(value) = monthly_budget {
            Self::validate(value, "Monthly budget")?;
        }
        if let Some(value) = daily_set_budget {
            Self::validate(value, "Daily set budget")?;
        }
        let mut entries = Vec::new();
        if let Some(value) = monthly_budget {
            entries.push((format!("{MONTHLY_BUDGET_PREFIX}{app}"), value.to_string()));
        }
        if let Some(value) = daily_set_budget {
            entries.push((format!("{DAILY_SET_BUDGET_PREFIX}{app}"), value.to_string()));
        }
        self.store.set_many(&entries)?;
        self.setting(app)
    }

    /// Settings for every app that has a stored value or a configured default.
    pub fn list(&self) -> Result<BTreeMap<String, BudgetSetting>> {
        let mut apps: Vec<String> = self.defaults.keys().cloned().collect();
        for prefix in [MONTHLY_BUDGET_PREFIX, DAILY_SET_BUDGET_PREFIX] {
            for (key, _) in self.store.list(prefix)? {
                apps.push(key[prefix.len()..].to_string());
            }
        }
        apps.into_iter()
            .map(|app| {
                let setting = self.setting(&app)?;
                Ok((app, setting))
            })
            .collect()
    }
}
