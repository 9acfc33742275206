use async_trait::async_trait;

use super::{CatalogSource, Cause};
use crate::core::errors::PipelineError;

/// Compiled-in knowledge base of five charitable causes.
///
/// Useful for demos and local development when the campaign backend is not
/// running.
pub struct FixedCatalog;

impl FixedCatalog {
    pub fn new() -> Self {
        FixedCatalog
    }

    fn causes() -> Vec<Cause> {
        let rows: [(&str, &str, &str, &str); 5] = [
            (
                "101",
                "Fondo Global para la Conservación de Océanos",
                "Asociación dedicada a la limpieza de plásticos marinos y protección de especies. Necesitan voluntarios para eventos de limpieza de playas.",
                "Medio Ambiente, Animales, Voluntariado, Océanos, Global, Cambio Climático",
            ),
            (
                "102",
                "Asociación de Apoyo Educativo para Niños",
                "Ofrece becas y tutorías a niños de comunidades de bajos ingresos. Buscan donaciones para útiles escolares.",
                "Educación, Niños, Becas, Tutoría, Local, Pobreza",
            ),
            (
                "103",
                "Albergue de Rescate Animal 'Patitas Felices'",
                "Rescata perros y gatos abandonados, proporcionando atención veterinaria y buscando adopción. Necesitan pienso y mantas.",
                "Animales, Mascotas, Adopción, Pienso, Local, Veterinaria",
            ),
            (
                "104",
                "Iniciativa para el Suministro de Agua Potable",
                "Organización que instala filtros de agua en zonas rurales con escasez. Buscan financiación para la compra de materiales.",
                "Salud, Suministro, Agua, Zonas Rurales, Financiación, Infraestructura",
            ),
            (
                "105",
                "Red de Asistencia a Personas Mayores en Hogares",
                "Proporciona compañía, alimentos y medicinas a personas mayores que viven solas. Se buscan voluntarios para visitas semanales.",
                "Salud, Personas Mayores, Compañía, Voluntariado, Hogares, Comunidad",
            ),
        ];

        rows.into_iter()
            .map(|(id, title, description, tags)| Cause {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                tags: tags.to_string(),
                goal: None,
                currency: None,
                creator: None,
            })
            .collect()
    }
}

impl Default for FixedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for FixedCatalog {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch(&self) -> Result<Vec<Cause>, PipelineError> {
        Ok(Self::causes())
    }
}
