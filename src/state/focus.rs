use crate::core::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(Field),
    SubmitButton,
}

impl FocusTarget {
    pub fn field(self) -> Option<Field> {
        match self {
            FocusTarget::Field(field) => Some(field),
            FocusTarget::SubmitButton => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FocusState {
    targets: Vec<FocusTarget>,
    index: usize,
}

impl Default for FocusState {
    fn default() -> Self {
        let mut targets: Vec<FocusTarget> = Field::ALL.into_iter().map(FocusTarget::Field).collect();
        targets.push(FocusTarget::SubmitButton);
        Self { targets, index: 0 }
    }
}

impl FocusState {
    pub fn current(&self) -> FocusTarget {
        self.targets[self.index]
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.current().field()
    }

    /// Moves focus forward and returns the target that was left.
    pub fn next(&mut self) -> FocusTarget {
        let left = self.current();
        self.index = (self.index + 1) % self.targets.len();
        left
    }

    /// Moves focus backward and returns the target that was left.
    pub fn prev(&mut self) -> FocusTarget {
        let left = self.current();
        self.index = (self.index + self.targets.len() - 1) % self.targets.len();
        left
    }
}
