use stockroom_auth::{AccessTarget, Caller, Operation};
use stockroom_core::CompanyId;
use stockroom_infra::CascadeSummary;
use stockroom_tenancy::{Company, CompanyUpdate};

use crate::app::AppServices;
use crate::app::guard::guard;
use crate::errors::{ServiceError, ServiceResult};

impl AppServices {
    pub fn get_company(&self, caller: &Caller, company_id: CompanyId) -> ServiceResult<Company> {
        guard(caller, Operation::ViewCompany, AccessTarget::Company(company_id))?;
        self.store
            .get_company(company_id)?
            .ok_or(ServiceError::NotFound("company"))
    }

    pub fn update_company(
        &self,
        caller: &Caller,
        company_id: CompanyId,
        update: &CompanyUpdate,
    ) -> ServiceResult<Company> {
        guard(caller, Operation::UpdateCompany, AccessTarget::Company(company_id))?;
        let current = self
            .store
            .get_company(company_id)?
            .ok_or(ServiceError::NotFound("company"))?;
        let next = current.apply_update(update)?;
        Ok(self.store.save_company(next)?)
    }

    /// ADMIN only. Removes the company, everything it owns and its owner.
    pub fn delete_company(&self, caller: &Caller, company_id: CompanyId) -> ServiceResult<CascadeSummary> {
        guard(caller, Operation::DeleteCompany, AccessTarget::Company(company_id))?;
        let summary = self.store.delete_company(company_id)?;
        tracing::info!(
            company_id = %company_id,
            by = caller.username(),
            employees = summary.employees,
            items = summary.items,
            owner_removed = summary.owner_removed,
            "company deleted"
        );
        Ok(summary)
    }

    /// ADMIN only.
    pub fn list_companies(&self, caller: &Caller) -> ServiceResult<Vec<Company>> {
        guard(caller, Operation::ListAllCompanies, AccessTarget::AllCompanies)?;
        Ok(self.store.list_companies()?)
    }
}
