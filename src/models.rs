use std::fmt;

use serde::{Deserialize, Serialize};

/// Biological sex as used by the Mifflin-St Jeor formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Self-reported activity level, mapped to a TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

/// The user's primary goal, a flat calorie deficit or surplus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    WeightLoss,
    Maintenance,
    WeightGain,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::WeightLoss => write!(f, "Weight Loss"),
            Goal::Maintenance => write!(f, "Maintenance"),
            Goal::WeightGain => write!(f, "Weight Gain"),
        }
    }
}

/// User profile. Replaced wholesale on every profile-form submission;
/// never edited in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub age: u32,
    pub gender: Gender,
    /// Weight in kg
    pub weight_kg: f64,
    /// Height in cm
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

impl Profile {
    /// Short profile line interpolated into the workout and coach prompts.
    pub fn describe(&self) -> String {
        format!(
            "Age: {}, Gender: {}, Weight: {}kg",
            self.age, self.gender, self.weight_kg
        )
    }
}

/// Estimated nutritional content for one meal, as produced by the analyzer.
/// Fields the analyzer omitted are zero, not missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionDelta {
    /// Calories (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbs (g)
    pub carbs_g: f64,
    /// Fats (g)
    pub fats_g: f64,
}

impl NutritionDelta {
    /// Element-wise addition into a running total.
    pub fn accumulate(&mut self, other: &NutritionDelta) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.carbs_g += other.carbs_g;
        self.fats_g += other.fats_g;
    }
}

/// The six fixed meal slots of the daily log, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    BreakfastSnack,
    Lunch,
    EveningSnack,
    Dinner,
    Dessert,
}

impl MealSlot {
    pub const ALL: [MealSlot; 6] = [
        MealSlot::Breakfast,
        MealSlot::BreakfastSnack,
        MealSlot::Lunch,
        MealSlot::EveningSnack,
        MealSlot::Dinner,
        MealSlot::Dessert,
    ];
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealSlot::Breakfast => write!(f, "Breakfast"),
            MealSlot::BreakfastSnack => write!(f, "Breakfast Snack"),
            MealSlot::Lunch => write!(f, "Lunch"),
            MealSlot::EveningSnack => write!(f, "Evening Snack"),
            MealSlot::Dinner => write!(f, "Dinner"),
            MealSlot::Dessert => write!(f, "Dessert"),
        }
    }
}

/// One logged meal. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntry {
    /// What the user typed
    pub description: String,
    pub nutrition: NutritionDelta,
}

/// One logged workout. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub description: String,
    /// Estimated kcal burned
    pub calories_burned: f64,
}

/// Where a water entry came from: the one-glass quick-add button or a
/// typed-in amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterSource {
    Glass,
    Bulk,
}

/// One logged water intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterEntry {
    pub source: WaterSource,
    pub milliliters: u32,
}
