//! GraphQL object types.

use super::store;
use async_graphql::{Context, Object, Result, SimpleObject, ID};
use colegio_core::{Area, Classroom, Office, Person, ReportTotals};

/// Area, optionally carrying a precomputed employee count.
pub struct AreaType {
    area: Area,
    employee_count: Option<u64>,
}

impl AreaType {
    pub fn with_count(area: Area, employee_count: u64) -> Self {
        Self {
            area,
            employee_count: Some(employee_count),
        }
    }
}

impl From<Area> for AreaType {
    fn from(area: Area) -> Self {
        Self {
            area,
            employee_count: None,
        }
    }
}

#[Object]
impl AreaType {
    async fn id(&self) -> ID {
        ID::from(self.area.id)
    }

    async fn nombre(&self) -> &str {
        &self.area.name
    }

    async fn num_empleados(&self, ctx: &Context<'_>) -> Result<u64> {
        if let Some(count) = self.employee_count {
            return Ok(count);
        }
        let area_id = self.area.id;
        Ok(store(ctx)?.with_service(|service| service.count_persons_in_area(area_id))?)
    }

    async fn oficinas(&self, ctx: &Context<'_>) -> Result<Vec<OficinaType>> {
        let area_id = self.area.id;
        let offices = store(ctx)?.with_service(|service| service.list_offices_in_area(area_id))?;
        Ok(offices.into_iter().map(OficinaType).collect())
    }

    async fn empleados(&self, ctx: &Context<'_>) -> Result<Vec<PersonaType>> {
        let area_id = self.area.id;
        let persons = store(ctx)?.with_service(|service| service.list_persons_in_area(area_id))?;
        Ok(persons.into_iter().map(PersonaType).collect())
    }
}

pub struct OficinaType(pub Office);

#[Object]
impl OficinaType {
    async fn id(&self) -> ID {
        ID::from(self.0.id)
    }

    async fn codigo(&self) -> &str {
        &self.0.code
    }

    async fn area(&self, ctx: &Context<'_>) -> Result<Option<AreaType>> {
        let area_id = self.0.area_id;
        let area = store(ctx)?.with_service(|service| service.get_area(area_id))?;
        Ok(area.map(AreaType::from))
    }

    async fn empleados(&self, ctx: &Context<'_>) -> Result<Vec<PersonaType>> {
        let office_id = self.0.id;
        let persons =
            store(ctx)?.with_service(|service| service.list_persons_in_office(office_id))?;
        Ok(persons.into_iter().map(PersonaType).collect())
    }
}

pub struct SalonClaseType(pub Classroom);

#[Object]
impl SalonClaseType {
    async fn id(&self) -> ID {
        ID::from(self.0.id)
    }

    async fn codigo(&self) -> &str {
        &self.0.code
    }
}

pub struct PersonaType(pub Person);

#[Object]
impl PersonaType {
    async fn id(&self) -> ID {
        ID::from(self.0.id)
    }

    async fn documento(&self) -> &str {
        &self.0.document_id
    }

    async fn nombre(&self) -> &str {
        &self.0.name
    }

    /// `professor` or `staff`.
    async fn tipo(&self) -> &str {
        self.0.kind.as_str()
    }

    /// `tenured` or `contractor`; null for staff.
    async fn tipo_profesor(&self) -> Option<&str> {
        self.0.professor_subtype.map(|subtype| subtype.as_str())
    }

    async fn area(&self, ctx: &Context<'_>) -> Result<Option<AreaType>> {
        let area_id = self.0.area_id;
        let area = store(ctx)?.with_service(|service| service.get_area(area_id))?;
        Ok(area.map(AreaType::from))
    }

    async fn oficina(&self, ctx: &Context<'_>) -> Result<Option<OficinaType>> {
        let office_id = self.0.office_id;
        let office = store(ctx)?.with_service(|service| service.get_office(office_id))?;
        Ok(office.map(OficinaType))
    }
}

/// Registry-wide totals.
#[derive(SimpleObject)]
pub struct ResumenEstadisticas {
    pub total_areas: u64,
    pub total_oficinas: u64,
    pub total_salones: u64,
    pub total_personas: u64,
    pub total_profesores: u64,
    pub total_administrativos: u64,
}

impl From<ReportTotals> for ResumenEstadisticas {
    fn from(totals: ReportTotals) -> Self {
        Self {
            total_areas: totals.total_areas,
            total_oficinas: totals.total_offices,
            total_salones: totals.total_classrooms,
            total_personas: totals.total_persons,
            total_profesores: totals.total_professors,
            total_administrativos: totals.total_staff,
        }
    }
}

#[derive(SimpleObject)]
pub struct AreaPayload {
    pub area: AreaType,
}

#[derive(SimpleObject)]
pub struct OficinaPayload {
    pub oficina: OficinaType,
}

#[derive(SimpleObject)]
pub struct SalonPayload {
    pub salon: SalonClaseType,
}

#[derive(SimpleObject)]
pub struct PersonaPayload {
    pub persona: PersonaType,
}
