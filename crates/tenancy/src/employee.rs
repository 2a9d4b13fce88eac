use serde::{Deserialize, Serialize};

use stockroom_core::{
    CompanyId, DomainResult, EmployeeId, Entity, TenantOwned, require_non_blank,
    require_non_negative_amount,
};

/// An employee on a company's books.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub company_id: CompanyId,
    pub name: String,
    pub grade: String,
    pub dept: String,
    pub salary: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub dept: String,
    #[serde(default)]
    pub salary: f64,
}

/// Partial update; `Some(0.0)` is an explicit zero salary, `None` is "no change".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub grade: Option<String>,
    pub dept: Option<String>,
    pub salary: Option<f64>,
}

impl Employee {
    pub fn hire(id: EmployeeId, company_id: CompanyId, input: NewEmployee) -> DomainResult<Self> {
        require_non_blank("employee name", &input.name)?;
        require_non_negative_amount("salary", input.salary)?;
        Ok(Self {
            id,
            company_id,
            name: input.name,
            grade: input.grade,
            dept: input.dept,
            salary: input.salary,
        })
    }

    pub fn apply_update(&self, update: &EmployeeUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        if let Some(name) = &update.name {
            require_non_blank("employee name", name)?;
            next.name = name.clone();
        }
        if let Some(grade) = &update.grade {
            next.grade = grade.clone();
        }
        if let Some(dept) = &update.dept {
            next.dept = dept.clone();
        }
        if let Some(salary) = update.salary {
            require_non_negative_amount("salary", salary)?;
            next.salary = salary;
        }
        Ok(next)
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TenantOwned for Employee {
    fn company_id(&self) -> CompanyId {
        self.company_id
    }
}
