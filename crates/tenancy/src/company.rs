use serde::{Deserialize, Serialize};

use stockroom_core::{CompanyId, DomainResult, Entity, IdentityId, require_non_blank};

/// A tenant: one company per registered owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub capacity: String,
    pub location: String,
    /// The identity that registered (and owns) this company.
    pub owner_id: IdentityId,
}

/// Partial update of company details; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub capacity: Option<String>,
    pub location: Option<String>,
}

impl Company {
    pub fn new(
        id: CompanyId,
        owner_id: IdentityId,
        name: impl Into<String>,
        capacity: impl Into<String>,
        location: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        require_non_blank("company name", &name)?;
        Ok(Self {
            id,
            name,
            capacity: capacity.into(),
            location: location.into(),
            owner_id,
        })
    }

    pub fn apply_update(&self, update: &CompanyUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        if let Some(name) = &update.name {
            require_non_blank("company name", name)?;
            next.name = name.clone();
        }
        if let Some(capacity) = &update.capacity {
            next.capacity = capacity.clone();
        }
        if let Some(location) = &update.location {
            next.location = location.clone();
        }
        Ok(next)
    }
}

impl Entity for Company {
    type Id = CompanyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> Company {
        Company::new(CompanyId::new(), IdentityId::new(), "Acme", "50", "Leeds").unwrap()
    }

    #[test]
    fn partial_update_touches_only_present_fields() {
        let company = acme();
        let updated = company
            .apply_update(&CompanyUpdate {
                location: Some("York".to_string()),
                ..CompanyUpdate::default()
            })
            .unwrap();
        assert_eq!(updated.name, "Acme");
        assert_eq!(updated.capacity, "50");
        assert_eq!(updated.location, "York");
        assert_eq!(updated.owner_id, company.owner_id);
    }

    #[test]
    fn name_cannot_be_blanked() {
        let err = acme().apply_update(&CompanyUpdate {
            name: Some(String::new()),
            ..CompanyUpdate::default()
        });
        assert!(err.is_err());
    }
}
