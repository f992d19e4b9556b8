use super::store;
use super::types::{AreaType, OficinaType, PersonaType, ResumenEstadisticas, SalonClaseType};
use async_graphql::{Context, Object, Result};
use colegio_core::RecordId;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn areas(&self, ctx: &Context<'_>) -> Result<Vec<AreaType>> {
        let areas = store(ctx)?.with_service(|service| service.list_areas())?;
        Ok(areas.into_iter().map(AreaType::from).collect())
    }

    async fn oficinas(&self, ctx: &Context<'_>) -> Result<Vec<OficinaType>> {
        let offices = store(ctx)?.with_service(|service| service.list_offices())?;
        Ok(offices.into_iter().map(OficinaType).collect())
    }

    async fn salones(&self, ctx: &Context<'_>) -> Result<Vec<SalonClaseType>> {
        let classrooms = store(ctx)?.with_service(|service| service.list_classrooms())?;
        Ok(classrooms.into_iter().map(SalonClaseType).collect())
    }

    async fn personas(&self, ctx: &Context<'_>) -> Result<Vec<PersonaType>> {
        let persons = store(ctx)?.with_service(|service| service.list_persons())?;
        Ok(persons.into_iter().map(PersonaType).collect())
    }

    async fn area(&self, ctx: &Context<'_>, id: RecordId) -> Result<Option<AreaType>> {
        let area = store(ctx)?.with_service(|service| service.get_area(id))?;
        Ok(area.map(AreaType::from))
    }

    async fn oficina(&self, ctx: &Context<'_>, id: RecordId) -> Result<Option<OficinaType>> {
        let office = store(ctx)?.with_service(|service| service.get_office(id))?;
        Ok(office.map(OficinaType))
    }

    async fn salon(&self, ctx: &Context<'_>, id: RecordId) -> Result<Option<SalonClaseType>> {
        let classroom = store(ctx)?.with_service(|service| service.get_classroom(id))?;
        Ok(classroom.map(SalonClaseType))
    }

    async fn persona(&self, ctx: &Context<'_>, id: RecordId) -> Result<Option<PersonaType>> {
        let person = store(ctx)?.with_service(|service| service.get_person(id))?;
        Ok(person.map(PersonaType))
    }

    /// Every area with its employee count, computed in one aggregate query.
    async fn reporte_areas(&self, ctx: &Context<'_>) -> Result<Vec<AreaType>> {
        let report = store(ctx)?.with_service(|service| service.build_area_report())?;
        Ok(report
            .areas
            .into_iter()
            .map(|row| AreaType::with_count(row.area, row.employee_count))
            .collect())
    }

    async fn resumen_estadisticas(&self, ctx: &Context<'_>) -> Result<ResumenEstadisticas> {
        let totals = store(ctx)?.with_service(|service| service.totals())?;
        Ok(totals.into())
    }
}
