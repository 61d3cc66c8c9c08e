//! Data-extraction flow: search first, then extract structured results.

use crate::error::Error;
use crate::llm::{GenerativeBackend, StructuredGenerator};
use crate::plan::SearchResult;
use crate::prompt::{Template, VarBag};
use crate::schema;
use crate::search::SearchProvider;

fn extraction_template() -> Template {
    Template::new(
        "extraction_prompt",
        "You are an expert data extractor. Your task is to extract structured data \
         from Search Engine Result Page (SERP) content.\n\
         The user performed the query: \"{{query}}\".\n\n\
         Analyze the following SERP results and extract the title, URL, description, \
         and determine the type of each result.\n\n\
         SERP Results (JSON):\n{{{serpResults}}}",
    )
}

/// Fetch search hits for `query`, then let the backend extract and classify
/// them. The two calls are strictly sequential: the prompt embeds the hits.
pub async fn extract_data(
    backend: &dyn GenerativeBackend,
    search: &dyn SearchProvider,
    query: &str,
) -> Result<Vec<SearchResult>, Error> {
    let hits = search.search(query).await?;
    if hits.is_empty() {
        log::debug!("search returned no hits for {:?}", query);
        return Ok(Vec::new());
    }

    let vars = VarBag::new()
        .set("query", query)
        .set_json("serpResults", &hits)?;

    StructuredGenerator::new(backend)
        .generate(&extraction_template(), &vars, &schema::search_results())
        .await
}
