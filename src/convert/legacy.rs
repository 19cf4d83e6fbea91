// Legacy dump rows mapped onto the existing HR schema, plus the migration
// script that wraps them (company, standard schedule, employees, check query).
//
// Text values are written as-is: every single quote was already stripped from
// the dump tokens, so nothing is escaped here.

use crate::convert::names::split_name;
use crate::convert::{sql_literal, strip_quotes};
use crate::parser::dump::MIN_EMPLOYEE_TOKENS;

pub const SCHEDULE_NAME: &str = "Horario Estándar Paragon";
pub const SCHEDULE_TIMEZONE: &str = "America/Tegucigalpa";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    // Only the exact legacy label "Activo" counts as active.
    pub fn from_legacy(label: &str) -> Self {
        if label == "Activo" {
            EmployeeStatus::Active
        } else {
            EmployeeStatus::Inactive
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyEmployee {
    pub id: String,
    pub dni: String,
    pub full_name: String,
    pub role: String,
    // Raw token, so numbers and NULL pass through untouched.
    pub base_salary: String,
    pub hire_date: String,
    pub bank: String,
    pub bank_account: String,
    pub status: EmployeeStatus,
}

impl LegacyEmployee {
    // Map an accepted dump row. Positions 5 and 6 carry nothing we migrate.
    pub fn from_tokens(tokens: &[String]) -> Result<Self, String> {
        if tokens.len() < MIN_EMPLOYEE_TOKENS {
            return Err(format!(
                "expected at least {} values, got {}",
                MIN_EMPLOYEE_TOKENS,
                tokens.len()
            ));
        }
        Ok(Self {
            id: strip_quotes(&tokens[0]).replace("::uuid", ""),
            dni: strip_quotes(&tokens[1]),
            full_name: strip_quotes(&tokens[2]),
            role: strip_quotes(&tokens[3]),
            base_salary: tokens[4].clone(),
            hire_date: strip_quotes(&tokens[7]),
            bank: strip_quotes(&tokens[8]),
            bank_account: strip_quotes(&tokens[9]),
            status: EmployeeStatus::from_legacy(&strip_quotes(&tokens[10])),
        })
    }

    // Split name kept alongside the row in the metadata column.
    pub fn metadata_json(&self) -> String {
        let (first_name, last_name) = split_name(&self.full_name);
        serde_json::json!({
            "first_name": first_name,
            "last_name": last_name,
        })
        .to_string()
    }

    // One VALUES tuple in `employees` column order, tied to `company`.
    pub fn to_sql_tuple(&self, company: &CompanyConfig) -> String {
        let company_id = company.id_lookup();
        format!(
            "(
    '{id}',                        -- id
    {company_id}, -- company_id
    NULL,                          -- department_id
    (SELECT id FROM work_schedules WHERE name = '{schedule}' AND company_id = {company_id} LIMIT 1), -- work_schedule_id
    NULL,                          -- employee_code
    '{dni}',                       -- dni
    '{name}',                      -- name
    NULL,                          -- email
    NULL,                          -- phone
    '{role}',                      -- role
    '{role}',                      -- position
    {salary},                      -- base_salary
    '{hired}',                     -- hire_date
    NULL,                          -- termination_date
    '{status}',                    -- status
    '{bank}',                      -- bank_name
    '{account}',                   -- bank_account
    NULL,                          -- emergency_contact_name
    NULL,                          -- emergency_contact_phone
    NULL,                          -- address
    {metadata}::jsonb,             -- metadata
    NOW(),                         -- created_at
    NOW()                          -- updated_at
)",
            id = self.id,
            company_id = company_id,
            schedule = SCHEDULE_NAME,
            dni = self.dni,
            name = self.full_name,
            role = self.role,
            salary = self.base_salary,
            hired = self.hire_date,
            status = self.status.as_str(),
            bank = self.bank,
            account = self.bank_account,
            metadata = sql_literal(&self.metadata_json()),
        )
    }
}

// Company the migrated employees are attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyConfig {
    pub name: String,
    pub subdomain: String,
}

impl CompanyConfig {
    // Subquery resolving the company row by subdomain.
    pub fn id_lookup(&self) -> String {
        format!(
            "(SELECT id FROM companies WHERE subdomain = {} LIMIT 1)",
            sql_literal(&self.subdomain)
        )
    }
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "Paragon Company".to_string(),
            subdomain: "paragon".to_string(),
        }
    }
}

// Full migration script for the given employees.
pub fn render_migration(employees: &[LegacyEmployee], company: &CompanyConfig, source: &str) -> String {
    let company_name = sql_literal(&company.name);
    let subdomain = sql_literal(&company.subdomain);
    let company_id = company.id_lookup();

    // An INSERT with an empty VALUES list is a syntax error.
    let employees_section = if employees.is_empty() {
        "-- No employees found; nothing to insert.".to_string()
    } else {
        let tuples: Vec<String> = employees.iter().map(|e| e.to_sql_tuple(company)).collect();
        format!(
            "INSERT INTO employees (
    id, company_id, department_id, work_schedule_id, employee_code,
    dni, name, email, phone, role, position, base_salary,
    hire_date, termination_date, status, bank_name, bank_account,
    emergency_contact_name, emergency_contact_phone, address,
    metadata, created_at, updated_at
) VALUES
{};",
            tuples.join(",")
        )
    };

    format!(
        "-- Employee migration onto the existing HR schema
-- Generated from {source}
-- Total employees: {count}

-- 1. Company
INSERT INTO companies (id, name, subdomain, plan_type, is_active)
VALUES (
    gen_random_uuid(),
    {company_name},
    {subdomain},
    'premium',
    true
) ON CONFLICT (subdomain) DO NOTHING;

-- 2. Standard work schedule
INSERT INTO work_schedules (
    id,
    company_id,
    name,
    monday_start, monday_end,
    tuesday_start, tuesday_end,
    wednesday_start, wednesday_end,
    thursday_start, thursday_end,
    friday_start, friday_end,
    saturday_start, saturday_end,
    sunday_start, sunday_end,
    break_duration,
    timezone
) VALUES (
    gen_random_uuid(),
    {company_id},
    '{schedule}',
    '08:00:00', '17:00:00',
    '08:00:00', '17:00:00',
    '08:00:00', '17:00:00',
    '08:00:00', '17:00:00',
    '08:00:00', '17:00:00',
    NULL, NULL,
    NULL, NULL,
    60,
    '{timezone}'
) ON CONFLICT DO NOTHING;

-- 3. Employees
{employees_section}

-- 4. Check
SELECT
    COUNT(*) as employees_inserted,
    COUNT(CASE WHEN status = 'active' THEN 1 END) as active,
    COUNT(CASE WHEN status = 'inactive' THEN 1 END) as inactive
FROM employees
WHERE company_id = {company_id};
",
        source = source,
        count = employees.len(),
        company_name = company_name,
        subdomain = subdomain,
        company_id = company_id,
        schedule = SCHEDULE_NAME,
        timezone = SCHEDULE_TIMEZONE,
        employees_section = employees_section,
    )
}
