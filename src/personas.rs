//! Persona catalog split into the Koi and Fox selectors

use crate::api::types::{Persona, PersonaModule};

/// One selector: an ordered persona list and the selected index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonaSelector {
    personas: Vec<Persona>,
    selected: Option<usize>,
}

impl PersonaSelector {
    /// Populate the selector, selecting the first entry if any
    pub fn populate(&mut self, personas: Vec<Persona>) {
        self.selected = if personas.is_empty() { None } else { Some(0) };
        self.personas = personas;
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn selected(&self) -> Option<&Persona> {
        self.selected.and_then(|i| self.personas.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Selected persona id, or an empty string when nothing is loaded
    pub fn selected_id(&self) -> &str {
        self.selected().map(|p| p.id.as_str()).unwrap_or("")
    }

    /// Select by id; returns false if the id is unknown
    pub fn select_id(&mut self, id: &str) -> bool {
        match self.personas.iter().position(|p| p.id == id) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self) {
        if let Some(idx) = self.selected {
            self.selected = Some((idx + 1) % self.personas.len());
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(idx) = self.selected {
            let len = self.personas.len();
            self.selected = Some((idx + len - 1) % len);
        }
    }
}

/// Both selectors, filled from one catalog response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonaCatalog {
    pub koi: PersonaSelector,
    pub fox: PersonaSelector,
}

impl PersonaCatalog {
    /// Partition the backend list by module, keeping backend order
    pub fn load(&mut self, personas: Vec<Persona>) {
        let (koi, fox) = partition(personas);
        self.koi.populate(koi);
        self.fox.populate(fox);
    }

    pub fn selector(&self, module: PersonaModule) -> &PersonaSelector {
        match module {
            PersonaModule::Koi => &self.koi,
            PersonaModule::Fox => &self.fox,
        }
    }

    pub fn selector_mut(&mut self, module: PersonaModule) -> &mut PersonaSelector {
        match module {
            PersonaModule::Koi => &mut self.koi,
            PersonaModule::Fox => &mut self.fox,
        }
    }
}

/// Split a persona list into (koi, fox), preserving relative order
pub fn partition(personas: Vec<Persona>) -> (Vec<Persona>, Vec<Persona>) {
    personas
        .into_iter()
        .partition(|p| p.module == PersonaModule::Koi)
}
