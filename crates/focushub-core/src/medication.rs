//! Medication inventory with low-stock warnings.
//!
//! Dosages may be fractional (half tablets), so pill counts are `f64`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};

/// Default number of days of supply below which a medication is flagged.
pub const DEFAULT_WARNING_DAYS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub total_pills: u32,
    pub remaining_pills: f64,
    pub dosage_per_day: f64,
    pub low_stock_warning_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl Medication {
    /// Whole days of supply left, rounded up. Zero when no dosage is set.
    pub fn days_remaining(&self) -> u32 {
        if self.dosage_per_day <= 0.0 {
            return 0;
        }
        (self.remaining_pills / self.dosage_per_day).ceil().max(0.0) as u32
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.remaining_pills <= 0.0
    }

    pub fn is_low_stock(&self) -> bool {
        self.days_remaining() <= self.low_stock_warning_days && !self.is_out_of_stock()
    }

    pub fn status(&self) -> StockStatus {
        if self.is_out_of_stock() {
            StockStatus::Out
        } else if self.is_low_stock() {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    /// Share of the last refill still left, in `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        if self.total_pills == 0 {
            return 0.0;
        }
        (self.remaining_pills / f64::from(self.total_pills)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Ok,
    Low,
    Out,
}

/// Parameters for a new medication.
#[derive(Debug, Clone)]
pub struct NewMedication<'a> {
    pub name: &'a str,
    pub total_pills: u32,
    pub dosage_per_day: f64,
    pub low_stock_warning_days: u32,
    pub notes: Option<&'a str>,
}

/// Counts across the whole cabinet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinetSummary {
    pub total: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cabinet {
    medications: Vec<Medication>,
}

impl Cabinet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Medication> {
        self.medications.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Medication> {
        self.medications.iter().find(|m| m.id == id)
    }

    /// # Errors
    /// Rejects a blank name, zero pills, or a non-positive dosage.
    pub fn add(&mut self, new: NewMedication<'_>, now: DateTime<Utc>) -> Result<&Medication> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName("medication name").into());
        }
        if new.total_pills == 0 {
            return Err(ValidationError::InvalidValue {
                field: "total_pills".into(),
                message: "must be at least 1".into(),
            }
            .into());
        }
        if !new.dosage_per_day.is_finite() || new.dosage_per_day <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "dosage_per_day".into(),
                message: format!("must be positive, got {}", new.dosage_per_day),
            }
            .into());
        }

        self.medications.push(Medication {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            total_pills: new.total_pills,
            remaining_pills: f64::from(new.total_pills),
            dosage_per_day: new.dosage_per_day,
            low_stock_warning_days: new.low_stock_warning_days,
            notes: new.notes.map(str::trim).filter(|n| !n.is_empty()).map(String::from),
            last_updated: now,
        });
        Ok(&self.medications[self.medications.len() - 1])
    }

    /// Deduct one day's dosage, never going below zero.
    pub fn take_dose(&mut self, id: &str, now: DateTime<Utc>) -> Result<&Medication> {
        let med = self.get_mut(id)?;
        med.remaining_pills = (med.remaining_pills - med.dosage_per_day).max(0.0);
        med.last_updated = now;
        if med.is_low_stock() {
            tracing::info!(name = %med.name, days = med.days_remaining(), "medication running low");
        }
        Ok(&*med)
    }

    /// Restock with a fresh pack of `pills`.
    pub fn refill(&mut self, id: &str, pills: u32, now: DateTime<Utc>) -> Result<&Medication> {
        if pills == 0 {
            return Err(ValidationError::InvalidValue {
                field: "pills".into(),
                message: "must be at least 1".into(),
            }
            .into());
        }
        let med = self.get_mut(id)?;
        med.total_pills = pills;
        med.remaining_pills = f64::from(pills);
        med.last_updated = now;
        Ok(&*med)
    }

    pub fn remove(&mut self, id: &str) -> Result<Medication> {
        let idx = self
            .medications
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| CoreError::not_found("medication", id))?;
        Ok(self.medications.remove(idx))
    }

    pub fn summary(&self) -> CabinetSummary {
        CabinetSummary {
            total: self.medications.len(),
            low_stock: self.medications.iter().filter(|m| m.is_low_stock()).count(),
            out_of_stock: self.medications.iter().filter(|m| m.is_out_of_stock()).count(),
        }
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Medication> {
        self.medications
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CoreError::not_found("medication", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_med(pills: u32, dosage: f64) -> NewMedication<'static> {
        NewMedication {
            name: "Methylphenidate",
            total_pills: pills,
            dosage_per_day: dosage,
            low_stock_warning_days: DEFAULT_WARNING_DAYS,
            notes: Some("  with breakfast "),
        }
    }

    #[test]
    fn days_remaining_rounds_up() {
        let mut cabinet = Cabinet::new();
        let med = cabinet.add(new_med(7, 2.0), Utc::now()).unwrap();
        assert_eq!(med.days_remaining(), 4);
        assert_eq!(med.notes.as_deref(), Some("with breakfast"));
    }

    #[test]
    fn take_dose_clamps_at_zero() {
        let mut cabinet = Cabinet::new();
        let id = cabinet.add(new_med(3, 2.0), Utc::now()).unwrap().id.clone();

        let med = cabinet.take_dose(&id, Utc::now()).unwrap();
        assert_eq!(med.remaining_pills, 1.0);
        assert!(med.is_low_stock());

        let med = cabinet.take_dose(&id, Utc::now()).unwrap();
        assert_eq!(med.remaining_pills, 0.0);
        assert!(med.is_out_of_stock());
        assert!(!med.is_low_stock());
        assert_eq!(med.status(), StockStatus::Out);
    }

    #[test]
    fn half_tablet_dosage() {
        let mut cabinet = Cabinet::new();
        let id = cabinet.add(new_med(30, 0.5), Utc::now()).unwrap().id.clone();
        let med = cabinet.take_dose(&id, Utc::now()).unwrap();
        assert_eq!(med.remaining_pills, 29.5);
        assert_eq!(med.days_remaining(), 59);
        assert_eq!(med.status(), StockStatus::Ok);
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let mut cabinet = Cabinet::new();
        let med = cabinet.add(new_med(5, 1.0), Utc::now()).unwrap();
        assert!(med.is_low_stock());
        let med = cabinet.add(new_med(6, 1.0), Utc::now()).unwrap();
        assert!(!med.is_low_stock());
        assert_eq!(cabinet.summary(), CabinetSummary { total: 2, low_stock: 1, out_of_stock: 0 });
    }

    #[test]
    fn zero_dosage_means_zero_days() {
        let med = Medication {
            id: "x".into(),
            name: "x".into(),
            total_pills: 10,
            remaining_pills: 10.0,
            dosage_per_day: 0.0,
            low_stock_warning_days: 5,
            notes: None,
            last_updated: Utc::now(),
        };
        assert_eq!(med.days_remaining(), 0);
    }

    #[test]
    fn refill_resets_counts() {
        let mut cabinet = Cabinet::new();
        let id = cabinet.add(new_med(2, 1.0), Utc::now()).unwrap().id.clone();
        cabinet.take_dose(&id, Utc::now()).unwrap();
        let med = cabinet.refill(&id, 60, Utc::now()).unwrap();
        assert_eq!(med.remaining_pills, 60.0);
        assert_eq!(med.fill_ratio(), 1.0);
        assert!(cabinet.refill(&id, 0, Utc::now()).is_err());
    }

    #[test]
    fn invalid_input_rejected() {
        let mut cabinet = Cabinet::new();
        assert!(cabinet.add(new_med(0, 1.0), Utc::now()).is_err());
        assert!(cabinet.add(new_med(10, 0.0), Utc::now()).is_err());
        assert!(cabinet.add(new_med(10, f64::NAN), Utc::now()).is_err());
        assert!(cabinet.remove("missing").is_err());
    }
}
