use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::models::{MealEntry, MealSlot, NutritionDelta, WaterEntry, WaterSource, WorkoutEntry};

/// Rejected before any state change; the ledger is never partially updated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("water amount must be positive")]
    ZeroWater,
}

/// In-memory aggregate of everything logged this session.
///
/// Append-only: entries are never edited or removed, so every running total
/// is non-decreasing for the life of the session. `totals` equals the
/// element-wise sum of all stored meal entries at all times; the append
/// methods validate first and then mutate entry list and total together, so
/// callers can never observe one without the other.
///
/// Resubmitting the same description appends a second entry and counts
/// twice. There is no dedup key on log actions.
#[derive(Debug, Clone, Serialize)]
pub struct Ledger {
    meals: BTreeMap<MealSlot, Vec<MealEntry>>,
    totals: NutritionDelta,
    workouts: Vec<WorkoutEntry>,
    calories_burned_total: f64,
    water: Vec<WaterEntry>,
    water_ml_total: u32,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Empty ledger with all six meal slots present.
    pub fn new() -> Self {
        Self {
            meals: MealSlot::ALL.iter().map(|s| (*s, Vec::new())).collect(),
            totals: NutritionDelta::default(),
            workouts: Vec::new(),
            calories_burned_total: 0.0,
            water: Vec::new(),
            water_ml_total: 0,
        }
    }

    /// Append a meal to its slot and fold its nutrition into the totals.
    pub fn append_meal(
        &mut self,
        slot: MealSlot,
        description: &str,
        nutrition: NutritionDelta,
    ) -> Result<(), InvalidInput> {
        let description = description.trim();
        if description.is_empty() {
            return Err(InvalidInput::EmptyDescription);
        }
        self.meals.entry(slot).or_default().push(MealEntry {
            description: description.to_string(),
            nutrition,
        });
        self.totals.accumulate(&nutrition);
        Ok(())
    }

    /// Append a workout and add its burn to the running counter.
    pub fn append_workout(
        &mut self,
        description: &str,
        calories_burned: f64,
    ) -> Result<(), InvalidInput> {
        let description = description.trim();
        if description.is_empty() {
            return Err(InvalidInput::EmptyDescription);
        }
        self.workouts.push(WorkoutEntry {
            description: description.to_string(),
            calories_burned,
        });
        self.calories_burned_total += calories_burned;
        Ok(())
    }

    /// Append a water intake and add it to the hydration counter.
    pub fn append_water(
        &mut self,
        source: WaterSource,
        milliliters: u32,
    ) -> Result<(), InvalidInput> {
        if milliliters == 0 {
            return Err(InvalidInput::ZeroWater);
        }
        self.water.push(WaterEntry {
            source,
            milliliters,
        });
        self.water_ml_total += milliliters;
        Ok(())
    }

    /// Entries logged for one slot, in append order.
    pub fn meals(&self, slot: MealSlot) -> &[MealEntry] {
        self.meals.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of meals logged across all slots.
    pub fn meal_count(&self) -> usize {
        self.meals.values().map(Vec::len).sum()
    }

    pub fn totals(&self) -> &NutritionDelta {
        &self.totals
    }

    pub fn workouts(&self) -> &[WorkoutEntry] {
        &self.workouts
    }

    pub fn calories_burned_total(&self) -> f64 {
        self.calories_burned_total
    }

    pub fn water(&self) -> &[WaterEntry] {
        &self.water
    }

    pub fn water_ml_total(&self) -> u32 {
        self.water_ml_total
    }

    /// Read-only projection with the dashboard's derived numbers.
    ///
    /// The base calorie target comes from the energy model; workouts raise
    /// it, so eating back burned calories still counts as on-target.
    pub fn snapshot(&self, base_calorie_target: f64) -> LedgerView {
        let adjusted_calorie_target = base_calorie_target + self.calories_burned_total;
        let consumed = self.totals.calories;
        let progress_fraction = if adjusted_calorie_target > 0.0 {
            (consumed / adjusted_calorie_target).clamp(0.0, 1.0)
        } else {
            0.0
        };
        LedgerView {
            meals: self
                .meals
                .iter()
                .map(|(slot, entries)| (*slot, entries.clone()))
                .collect(),
            totals: self.totals,
            workouts: self.workouts.clone(),
            calories_burned_total: self.calories_burned_total,
            water: self.water.clone(),
            water_ml_total: self.water_ml_total,
            base_calorie_target,
            adjusted_calorie_target,
            calories_remaining: adjusted_calorie_target - consumed,
            progress_fraction,
        }
    }
}

/// Snapshot of ledger state plus derived dashboard fields.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerView {
    /// Entries per slot in fixed slot order, append order within a slot.
    pub meals: Vec<(MealSlot, Vec<MealEntry>)>,
    pub totals: NutritionDelta,
    pub workouts: Vec<WorkoutEntry>,
    pub calories_burned_total: f64,
    pub water: Vec<WaterEntry>,
    pub water_ml_total: u32,
    pub base_calorie_target: f64,
    pub adjusted_calorie_target: f64,
    pub calories_remaining: f64,
    pub progress_fraction: f64,
}
