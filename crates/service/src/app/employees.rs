use stockroom_auth::{AccessTarget, Caller, Operation};
use stockroom_core::{CompanyId, EmployeeId};
use stockroom_tenancy::{Employee, EmployeeUpdate, NewEmployee};

use crate::app::AppServices;
use crate::app::guard::{guard, guard_owned};
use crate::errors::ServiceResult;

impl AppServices {
    pub fn list_employees(&self, caller: &Caller, company_id: CompanyId) -> ServiceResult<Vec<Employee>> {
        guard(caller, Operation::ListEmployees, AccessTarget::Company(company_id))?;
        Ok(self.store.employees_of(company_id)?)
    }

    pub fn add_employee(
        &self,
        caller: &Caller,
        company_id: CompanyId,
        employee: NewEmployee,
    ) -> ServiceResult<Employee> {
        guard(caller, Operation::AddEmployee, AccessTarget::Company(company_id))?;
        let hired = Employee::hire(EmployeeId::new(), company_id, employee)?;
        let saved = self.store.insert_employee(hired)?;
        tracing::debug!(employee_id = %saved.id, company_id = %company_id, "employee added");
        Ok(saved)
    }

    pub fn update_employee(
        &self,
        caller: &Caller,
        employee_id: EmployeeId,
        update: &EmployeeUpdate,
    ) -> ServiceResult<Employee> {
        let found = self.store.get_employee(employee_id)?;
        let current = guard_owned(caller, Operation::UpdateEmployee, found, "employee")?;
        let next = current.apply_update(update)?;
        Ok(self.store.update_employee(next)?)
    }

    pub fn delete_employee(&self, caller: &Caller, employee_id: EmployeeId) -> ServiceResult<()> {
        let found = self.store.get_employee(employee_id)?;
        guard_owned(caller, Operation::DeleteEmployee, found, "employee")?;
        self.store.delete_employee(employee_id)?;
        tracing::debug!(employee_id = %employee_id, "employee deleted");
        Ok(())
    }
}
