use std::fmt;

use serde::Serialize;

use crate::models::{ActivityLevel, Gender, Goal, Profile};

/// Basal metabolic rate in kcal/day, Mifflin-St Jeor.
pub fn bmr(gender: Gender, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Total daily energy expenditure: BMR scaled by activity level.
pub fn tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    let multiplier = match activity_level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::LightlyActive => 1.375,
        ActivityLevel::ModeratelyActive => 1.55,
        ActivityLevel::VeryActive => 1.725,
    };
    bmr * multiplier
}

/// Daily calorie target: a flat 500 kcal deficit or surplus around TDEE.
pub fn calorie_target(tdee: f64, goal: Goal) -> f64 {
    match goal {
        Goal::WeightLoss => tdee - 500.0,
        Goal::Maintenance => tdee,
        Goal::WeightGain => tdee + 500.0,
    }
}

/// Body mass index, or 0 when height is not positive.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obesity,
}

/// Bucket a BMI value. Boundaries are 18.5 / 24.9 / 29.9.
pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 24.9 {
        BmiCategory::Normal
    } else if bmi < 29.9 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obesity
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmiCategory::Underweight => write!(f, "Underweight"),
            BmiCategory::Normal => write!(f, "Normal weight"),
            BmiCategory::Overweight => write!(f, "Overweight"),
            BmiCategory::Obesity => write!(f, "Obesity"),
        }
    }
}

/// Everything the energy model derives from one profile.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnergyOutputs {
    pub bmr: f64,
    pub tdee: f64,
    /// Base daily target before workout adjustment
    pub calorie_target: f64,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
}

impl EnergyOutputs {
    pub fn for_profile(profile: &Profile) -> Self {
        let bmr = bmr(
            profile.gender,
            profile.weight_kg,
            profile.height_cm,
            profile.age,
        );
        let tdee = tdee(bmr, profile.activity_level);
        let bmi = bmi(profile.weight_kg, profile.height_cm);
        Self {
            bmr,
            tdee,
            calorie_target: calorie_target(tdee, profile.goal),
            bmi,
            bmi_category: bmi_category(bmi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn male_sedentary_maintenance_scenario() {
        let b = bmr(Gender::Male, 70.0, 175.0, 30);
        assert!((b - 1673.75).abs() < 1e-9);

        let t = tdee(b, ActivityLevel::Sedentary);
        assert!((t - 2008.5).abs() < 1e-9);

        assert!((calorie_target(t, Goal::Maintenance) - 2008.5).abs() < 1e-9);
        assert!((calorie_target(t, Goal::WeightLoss) - 1508.5).abs() < 1e-9);
        assert!((calorie_target(t, Goal::WeightGain) - 2508.5).abs() < 1e-9);
    }

    #[test]
    fn female_offset_applies() {
        let b = bmr(Gender::Female, 60.0, 165.0, 25);
        assert!((b - (600.0 + 1031.25 - 125.0 - 161.0)).abs() < 1e-9);
    }

    #[test]
    fn activity_multipliers() {
        assert!((tdee(1000.0, ActivityLevel::Sedentary) - 1200.0).abs() < 1e-9);
        assert!((tdee(1000.0, ActivityLevel::LightlyActive) - 1375.0).abs() < 1e-9);
        assert!((tdee(1000.0, ActivityLevel::ModeratelyActive) - 1550.0).abs() < 1e-9);
        assert!((tdee(1000.0, ActivityLevel::VeryActive) - 1725.0).abs() < 1e-9);
    }

    #[test]
    fn bmi_scenario_and_zero_height_guard() {
        let b = bmi(70.0, 175.0);
        assert!((b - 70.0 / (1.75 * 1.75)).abs() < 1e-9);
        assert_eq!(bmi_category(b), BmiCategory::Normal);
        assert_eq!(bmi_category(b).to_string(), "Normal weight");

        assert_eq!(bmi(70.0, 0.0), 0.0);
        assert_eq!(bmi(70.0, -10.0), 0.0);
    }

    #[test]
    fn bmi_buckets() {
        assert_eq!(bmi_category(17.0), BmiCategory::Underweight);
        assert_eq!(bmi_category(18.5), BmiCategory::Normal);
        assert_eq!(bmi_category(24.9), BmiCategory::Overweight);
        assert_eq!(bmi_category(29.9), BmiCategory::Obesity);
        assert_eq!(bmi_category(35.0), BmiCategory::Obesity);
    }

    #[test]
    fn outputs_combine_per_profile() {
        let profile = Profile {
            age: 30,
            gender: Gender::Male,
            weight_kg: 70.0,
            height_cm: 175.0,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::Maintenance,
        };
        let energy = EnergyOutputs::for_profile(&profile);
        assert!((energy.calorie_target - 2008.5).abs() < 1e-9);
        assert_eq!(energy.bmi_category, BmiCategory::Normal);
    }
}
