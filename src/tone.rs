//! Tone sliders forwarded uninterpreted to the backend

use serde::{Deserialize, Serialize};

/// The three tone sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneSlider {
    Aggressiveness,
    Interruptiveness,
    StructureStrength,
}

impl ToneSlider {
    pub const ALL: [ToneSlider; 3] = [
        ToneSlider::Aggressiveness,
        ToneSlider::Interruptiveness,
        ToneSlider::StructureStrength,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToneSlider::Aggressiveness => "Aggressiveness",
            ToneSlider::Interruptiveness => "Interruptiveness",
            ToneSlider::StructureStrength => "Structure strength",
        }
    }
}

/// Slider values, each kept in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneParameters {
    pub aggressiveness: f64,
    pub interruptiveness: f64,
    pub structure_strength: f64,
}

impl Default for ToneParameters {
    fn default() -> Self {
        Self {
            aggressiveness: 0.5,
            interruptiveness: 0.3,
            structure_strength: 0.6,
        }
    }
}

impl ToneParameters {
    /// Current value of a slider
    pub fn get(&self, slider: ToneSlider) -> f64 {
        match slider {
            ToneSlider::Aggressiveness => self.aggressiveness,
            ToneSlider::Interruptiveness => self.interruptiveness,
            ToneSlider::StructureStrength => self.structure_strength,
        }
    }

    /// Set a slider, clamped into range
    pub fn set(&mut self, slider: ToneSlider, value: f64) {
        let value = clamp_unit(value);
        match slider {
            ToneSlider::Aggressiveness => self.aggressiveness = value,
            ToneSlider::Interruptiveness => self.interruptiveness = value,
            ToneSlider::StructureStrength => self.structure_strength = value,
        }
    }

    /// Move a slider by `delta`, snapping to hundredths
    pub fn adjust(&mut self, slider: ToneSlider, delta: f64) {
        let moved = ((self.get(slider) + delta) * 100.0).round() / 100.0;
        self.set(slider, moved);
    }

    /// Display label of a slider
    pub fn label(&self, slider: ToneSlider) -> String {
        format_tone(self.get(slider))
    }

    /// True when every slider lies in `[0, 1]`
    pub fn is_valid(&self) -> bool {
        ToneSlider::ALL
            .iter()
            .all(|s| (0.0..=1.0).contains(&self.get(*s)))
    }
}

/// Fixed two-decimal rendering used for slider labels
pub fn format_tone(value: f64) -> String {
    format!("{:.2}", value)
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_use_two_decimals() {
        let mut tone = ToneParameters::default();
        for step in 0..=20 {
            let value = step as f64 * 0.05;
            tone.set(ToneSlider::Aggressiveness, value);
            assert_eq!(tone.label(ToneSlider::Aggressiveness), format!("{:.2}", value));
            assert_eq!(tone.label(ToneSlider::Aggressiveness).split('.').nth(1).unwrap().len(), 2);
        }
    }

    #[test]
    fn test_default_labels() {
        let tone = ToneParameters::default();
        assert_eq!(tone.label(ToneSlider::Aggressiveness), "0.50");
        assert_eq!(tone.label(ToneSlider::Interruptiveness), "0.30");
        assert_eq!(tone.label(ToneSlider::StructureStrength), "0.60");
    }

    #[test]
    fn test_adjust_clamps_to_unit_interval() {
        let mut tone = ToneParameters::default();
        for _ in 0..30 {
            tone.adjust(ToneSlider::StructureStrength, 0.05);
        }
        assert_eq!(tone.structure_strength, 1.0);

        for _ in 0..30 {
            tone.adjust(ToneSlider::StructureStrength, -0.05);
        }
        assert_eq!(tone.structure_strength, 0.0);
        assert!(tone.is_valid());
    }

    #[test]
    fn test_adjust_does_not_drift() {
        let mut tone = ToneParameters::default();
        tone.adjust(ToneSlider::Interruptiveness, 0.05);
        tone.adjust(ToneSlider::Interruptiveness, 0.05);
        assert_eq!(tone.interruptiveness, 0.4);
        assert_eq!(tone.label(ToneSlider::Interruptiveness), "0.40");
    }

    #[test]
    fn test_sliders_are_independent() {
        let mut tone = ToneParameters::default();
        tone.set(ToneSlider::Aggressiveness, 0.9);
        assert_eq!(tone.interruptiveness, 0.3);
        assert_eq!(tone.structure_strength, 0.6);
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut tone = ToneParameters::default();
        tone.set(ToneSlider::Aggressiveness, f64::NAN);
        assert_eq!(tone.aggressiveness, 0.0);
    }
}
