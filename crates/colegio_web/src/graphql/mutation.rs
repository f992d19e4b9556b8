use super::store;
use super::types::{
    AreaPayload, AreaType, OficinaPayload, OficinaType, PersonaPayload, PersonaType, SalonClaseType,
    SalonPayload,
};
use async_graphql::{Context, Object, Result};
use colegio_core::{
    AreaDraft, ClassroomDraft, OfficeDraft, PersonDraft, PersonKind, ProfessorSubtype, RecordId,
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_area(&self, ctx: &Context<'_>, nombre: String) -> Result<AreaPayload> {
        let draft = AreaDraft::new(nombre);
        let area = store(ctx)?.with_service(|service| service.create_area(&draft))?;
        Ok(AreaPayload { area: area.into() })
    }

    async fn update_area(
        &self,
        ctx: &Context<'_>,
        id: RecordId,
        nombre: String,
    ) -> Result<AreaPayload> {
        let draft = AreaDraft::new(nombre);
        let area = store(ctx)?.with_service(|service| service.update_area(id, &draft))?;
        Ok(AreaPayload { area: area.into() })
    }

    /// Also deletes the area's offices and every person referencing either.
    ///
    /// The payload carries the employee count from before the delete.
    async fn delete_area(&self, ctx: &Context<'_>, id: RecordId) -> Result<AreaPayload> {
        let (area, employee_count) = store(ctx)?.with_service(|service| {
            let employee_count = service.count_persons_in_area(id)?;
            Ok((service.delete_area(id)?, employee_count))
        })?;
        Ok(AreaPayload {
            area: AreaType::with_count(area, employee_count),
        })
    }

    async fn create_oficina(
        &self,
        ctx: &Context<'_>,
        codigo: String,
        area_id: RecordId,
    ) -> Result<OficinaPayload> {
        let draft = OfficeDraft::new(codigo, area_id);
        let office = store(ctx)?.with_service(|service| service.create_office(&draft))?;
        Ok(OficinaPayload {
            oficina: OficinaType(office),
        })
    }

    async fn update_oficina(
        &self,
        ctx: &Context<'_>,
        id: RecordId,
        codigo: String,
        area_id: RecordId,
    ) -> Result<OficinaPayload> {
        let draft = OfficeDraft::new(codigo, area_id);
        let office = store(ctx)?.with_service(|service| service.update_office(id, &draft))?;
        Ok(OficinaPayload {
            oficina: OficinaType(office),
        })
    }

    async fn delete_oficina(&self, ctx: &Context<'_>, id: RecordId) -> Result<OficinaPayload> {
        let office = store(ctx)?.with_service(|service| service.delete_office(id))?;
        Ok(OficinaPayload {
            oficina: OficinaType(office),
        })
    }

    async fn create_salon(&self, ctx: &Context<'_>, codigo: String) -> Result<SalonPayload> {
        let draft = ClassroomDraft::new(codigo);
        let classroom = store(ctx)?.with_service(|service| service.create_classroom(&draft))?;
        Ok(SalonPayload {
            salon: SalonClaseType(classroom),
        })
    }

    async fn update_salon(
        &self,
        ctx: &Context<'_>,
        id: RecordId,
        codigo: String,
    ) -> Result<SalonPayload> {
        let draft = ClassroomDraft::new(codigo);
        let classroom =
            store(ctx)?.with_service(|service| service.update_classroom(id, &draft))?;
        Ok(SalonPayload {
            salon: SalonClaseType(classroom),
        })
    }

    async fn delete_salon(&self, ctx: &Context<'_>, id: RecordId) -> Result<SalonPayload> {
        let classroom = store(ctx)?.with_service(|service| service.delete_classroom(id))?;
        Ok(SalonPayload {
            salon: SalonClaseType(classroom),
        })
    }

    #[allow(clippy::too_many_arguments)]
    async fn create_persona(
        &self,
        ctx: &Context<'_>,
        documento: String,
        nombre: String,
        tipo: String,
        tipo_profesor: Option<String>,
        area_id: RecordId,
        oficina_id: RecordId,
    ) -> Result<PersonaPayload> {
        let draft = person_draft(documento, nombre, &tipo, tipo_profesor, area_id, oficina_id)?;
        let person = store(ctx)?.with_service(|service| service.create_person(&draft))?;
        Ok(PersonaPayload {
            persona: PersonaType(person),
        })
    }

    #[allow(clippy::too_many_arguments)]
    async fn update_persona(
        &self,
        ctx: &Context<'_>,
        id: RecordId,
        documento: String,
        nombre: String,
        tipo: String,
        tipo_profesor: Option<String>,
        area_id: RecordId,
        oficina_id: RecordId,
    ) -> Result<PersonaPayload> {
        let draft = person_draft(documento, nombre, &tipo, tipo_profesor, area_id, oficina_id)?;
        let person = store(ctx)?.with_service(|service| service.update_person(id, &draft))?;
        Ok(PersonaPayload {
            persona: PersonaType(person),
        })
    }

    async fn delete_persona(&self, ctx: &Context<'_>, id: RecordId) -> Result<PersonaPayload> {
        let person = store(ctx)?.with_service(|service| service.delete_person(id))?;
        Ok(PersonaPayload {
            persona: PersonaType(person),
        })
    }
}

/// Builds a draft from raw arguments; a blank `tipoProfesor` counts as absent.
fn person_draft(
    documento: String,
    nombre: String,
    tipo: &str,
    tipo_profesor: Option<String>,
    area_id: RecordId,
    oficina_id: RecordId,
) -> Result<PersonDraft> {
    let kind = tipo.parse::<PersonKind>()?;
    let professor_subtype = match tipo_profesor.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<ProfessorSubtype>()?),
    };
    Ok(PersonDraft {
        document_id: documento,
        name: nombre,
        kind,
        professor_subtype,
        area_id,
        office_id: oficina_id,
    })
}
