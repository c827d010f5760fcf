use crate::models::Qualifier;

/// How an actor role affects the creator list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleClass {
    /// Plain creator
    Primary,
    /// Creator whose role implies a qualifier
    Qualified(Qualifier),
    /// Known role that is not a creator
    Skip,
}

/// Classify a role label; `None` means the label is outside the vocabulary
pub fn classify_role(role: &str) -> Option<RoleClass> {
    let class = match role.trim() {
        "Konstnär" | "Utförd av" | "Komp. och utförd av" => RoleClass::Primary,
        "Attribuerad till" => RoleClass::Qualified(Qualifier::AttributedTo),
        "Kopia efter" | "Fri kopia efter" | "Efter" => RoleClass::Qualified(Qualifier::After),
        "Tidigare attribution" | "Medarbetare" | "Alternativ tillskrivning" | "Beställare" => {
            RoleClass::Skip
        }
        _ => return None,
    };
    Some(class)
}

/// Classify an attribution qualifier label
///
/// Outer `None`: unknown label. Inner `None`: known label without a code.
pub fn classify_qualifier(label: &str) -> Option<Option<Qualifier>> {
    let qualifier = match label.trim() {
        "Tillskriven" | "Attribuerad till" => Some(Qualifier::AttributedTo),
        "Hennes ateljé" | "Hans ateljé" => Some(Qualifier::WorkshopOf),
        "Hennes skola" | "Hans skola" => Some(Qualifier::SchoolOf),
        "Hennes art" | "Hans art" => Some(Qualifier::MannerOf),
        "Kopia efter" | "Fri kopia efter" | "Efter" => Some(Qualifier::After),
        "Osäker attribution" | "Alternativ attribution" => None,
        _ => return None,
    };
    Some(qualifier)
}
