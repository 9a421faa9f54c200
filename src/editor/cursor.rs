// src/editor/cursor.rs
use super::section::FieldKind;

/// Focusable part of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Field(FieldKind),
    Remove,
}

/// Keyboard focus over the container. Positions are container order, not
/// section indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Section { position: usize, slot: Slot },
    AddControl,
}

impl Focus {
    pub fn first(sections: usize) -> Self {
        if sections == 0 {
            Focus::AddControl
        } else {
            Focus::quote(0)
        }
    }

    pub fn quote(position: usize) -> Self {
        Focus::Section { position, slot: Slot::Field(FieldKind::Quote) }
    }

    pub fn next(self, sections: usize) -> Self {
        match self.clamp(sections) {
            Focus::Section { position, slot } => match slot {
                Slot::Field(FieldKind::Quote) => Focus::Section { position, slot: Slot::Field(FieldKind::Commentary) },
                Slot::Field(FieldKind::Commentary) => Focus::Section { position, slot: Slot::Remove },
                Slot::Remove if position + 1 < sections => Focus::quote(position + 1),
                Slot::Remove => Focus::AddControl,
            },
            Focus::AddControl => Focus::first(sections),
        }
    }

    pub fn prev(self, sections: usize) -> Self {
        match self.clamp(sections) {
            Focus::Section { position, slot } => match slot {
                Slot::Remove => Focus::Section { position, slot: Slot::Field(FieldKind::Commentary) },
                Slot::Field(FieldKind::Commentary) => Focus::quote(position),
                Slot::Field(FieldKind::Quote) if position > 0 => Focus::Section { position: position - 1, slot: Slot::Remove },
                Slot::Field(FieldKind::Quote) => Focus::AddControl,
            },
            Focus::AddControl if sections > 0 => Focus::Section { position: sections - 1, slot: Slot::Remove },
            Focus::AddControl => Focus::AddControl,
        }
    }

    /// Keeps the focus on an existing element after the container shrank.
    pub fn clamp(self, sections: usize) -> Self {
        match self {
            Focus::Section { position, .. } if position >= sections => {
                if sections == 0 {
                    Focus::AddControl
                } else {
                    Focus::quote(sections - 1)
                }
            }
            other => other,
        }
    }

    /// Follows the focused element after the section at `removed` left a
    /// container that now holds `sections` sections.
    pub fn after_removal(self, removed: usize, sections: usize) -> Self {
        match self {
            Focus::Section { position, slot } if position > removed => {
                Focus::Section { position: position - 1, slot }
            }
            other => other.clamp(sections),
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            Focus::Section { position, .. } => Some(*position),
            Focus::AddControl => None,
        }
    }

    pub fn field(&self) -> Option<(usize, FieldKind)> {
        match self {
            Focus::Section { position, slot: Slot::Field(kind) } => Some((*position, *kind)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_every_slot() {
        let mut focus = Focus::first(2);
        let mut seen = vec![focus];
        for _ in 0..7 {
            focus = focus.next(2);
            seen.push(focus);
        }
        assert_eq!(seen[3], Focus::quote(1));
        assert_eq!(seen[6], Focus::AddControl);
        assert_eq!(seen[7], Focus::quote(0));
    }

    #[test]
    fn test_prev_reverses_next() {
        let start = Focus::Section { position: 1, slot: Slot::Remove };
        assert_eq!(start.next(3).prev(3), start);
        assert_eq!(Focus::quote(0).prev(3), Focus::AddControl);
        assert_eq!(Focus::AddControl.prev(3), Focus::Section { position: 2, slot: Slot::Remove });
    }

    #[test]
    fn test_clamp_after_removal() {
        let focus = Focus::Section { position: 2, slot: Slot::Remove };
        assert_eq!(focus.clamp(2), Focus::quote(1));
        assert_eq!(focus.clamp(0), Focus::AddControl);
        assert_eq!(focus.clamp(3), focus);
    }

    #[test]
    fn test_after_removal_shifts_later_focus() {
        let focus = Focus::Section { position: 3, slot: Slot::Field(FieldKind::Commentary) };
        assert_eq!(focus.after_removal(1, 3), Focus::Section { position: 2, slot: Slot::Field(FieldKind::Commentary) });
        assert_eq!(Focus::quote(0).after_removal(1, 3), Focus::quote(0));
        assert_eq!(Focus::quote(0).after_removal(0, 0), Focus::AddControl);
    }

    #[test]
    fn test_empty_container_stays_on_add() {
        assert_eq!(Focus::AddControl.next(0), Focus::AddControl);
        assert_eq!(Focus::AddControl.prev(0), Focus::AddControl);
    }
}
