/// Builds the single generation prompt: role preamble, schema catalog,
/// SELECT-only constraint, one worked example, then the user's question
/// quoted verbatim.
pub fn build_sql_prompt(natural_query: &str, schema: &str) -> String {
    format!(
        "Eres un asistente que traduce peticiones en SQL. \
         Este es el esquema de la base de datos:\n\n\
         {schema}\n\
         Solo se permiten consultas SELECT. Evita anotaciones extra como '''sql ''' o similar.\n\
         Por ejemplo: Pregunta: ¿Cuantos colaboradores existen? respuesta: SELECT COUNT(*) FROM colaboradores\n\
         Genera SOLO la consulta SQL válida que responda a:\n\
         \"{natural_query}\""
    )
}
