//! Prompt composition for the generation request.

use crate::index::SearchHit;

use super::intent::{CONFIRM_DONATE_TOKEN, SHOW_DETAILS_TOKEN};

/// Instruction-block version. The wording below is part of the model-facing
/// interface: it teaches the model the exact control-token grammar the
/// intent parser matches on. Changing it changes model behavior — bump the
/// version, don't edit silently.
pub const INSTRUCTIONS_VERSION: u32 = 2;

fn instruction_block() -> String {
    format!(
        "Eres un 'Asistente Recomendador de Beneficencia' llamado RAG-Bot. \
         Tu trabajo es analizar la consulta del usuario y las 'RECOMENDACIONES DE CAUSAS' \
         proporcionadas (que incluyen un 'ID de la Causa').\
         \n1. Si el usuario pide información general o una recomendación (ej. 'ayudar animales'), \
         responde normalmente y sugiere la mejor causa.\
         \n2. Si el usuario pregunta por una *iniciativa específica* (ej. 'qué es Patitas Felices', \
         'háblame del Fondo Global'), resume la información y **DEBES** añadir al final el código: \
         {details}[URL:/iniciativa/ID_DE_LA_CAUSA]. \
         Reemplaza 'ID_DE_LA_CAUSA' con el ID numérico que encontraste en el contexto.\
         \n3. Si el usuario expresa intención de donar (ej. 'quiero pagar'), responde con una \
         pregunta de confirmación y **DEBES** añadir el código: {donate}.",
        details = SHOW_DETAILS_TOKEN,
        donate = CONFIRM_DONATE_TOKEN,
    )
}

/// Merge the instruction block, the retrieved context, and the literal user
/// query into one generation request.
pub fn compose(query: &str, hits: &[SearchHit]) -> String {
    let mut context = String::from("RECOMENDACIONES DE CAUSAS ENCONTRADAS:\n");
    for (i, hit) in hits.iter().enumerate() {
        context.push_str(&format!("### CAUSA {}\n{}\n\n", i + 1, hit.cause.document));
    }

    format!(
        "{}\n\nCONTEXTO RECUPERADO:\n{}\nPregunta del usuario: '{}'",
        instruction_block(),
        context,
        query
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexedCause;

    fn hit(id: &str, document: &str) -> SearchHit {
        SearchHit {
            cause: IndexedCause {
                cause_id: id.to_string(),
                document: document.to_string(),
                title: String::new(),
                tags: None,
            },
            score: 0.9,
        }
    }

    #[test]
    fn prompt_contains_instructions_context_and_query() {
        let prompt = compose(
            "quiero ayudar a animales",
            &[
                hit("103", "ID de la Causa: 103. Título: Patitas Felices."),
                hit("101", "ID de la Causa: 101. Título: Océanos."),
            ],
        );

        assert!(prompt.contains("Asistente Recomendador de Beneficencia"));
        assert!(prompt.contains("### CAUSA 1\nID de la Causa: 103."));
        assert!(prompt.contains("### CAUSA 2\nID de la Causa: 101."));
        assert!(prompt.ends_with("Pregunta del usuario: 'quiero ayudar a animales'"));
    }

    #[test]
    fn instructions_quote_the_parser_tokens() {
        // The grammar the model is taught must be the grammar the parser
        // matches on.
        let prompt = compose("hola", &[]);
        assert!(prompt.contains(CONFIRM_DONATE_TOKEN));
        assert!(prompt.contains(SHOW_DETAILS_TOKEN));
        assert!(prompt.contains("[URL:/iniciativa/ID_DE_LA_CAUSA]"));
    }

    #[test]
    fn no_hits_still_yields_a_complete_prompt() {
        let prompt = compose("hola", &[]);
        assert!(prompt.contains("RECOMENDACIONES DE CAUSAS ENCONTRADAS:"));
        assert!(prompt.ends_with("Pregunta del usuario: 'hola'"));
    }
}
