use watchlog::{AppContext, CatalogClient};

fn require_catalog(ctx: &AppContext) -> Result<&dyn CatalogClient, Box<dyn std::error::Error>> {
    Ok(ctx
        .catalog()
        .ok_or("Catalog search needs a TMDB API key (--api-key or TMDB_API_KEY)")?)
}

/// Handle searching the catalog for candidates matching a title
pub async fn handle_search(
    ctx: &AppContext,
    query: &str,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = require_catalog(ctx)?;

    eprintln!("Searching the catalog for '{query}'...");
    let candidates = catalog.resolve_candidates(query).await?;

    if candidates.is_empty() {
        eprintln!("No matches found for '{query}'");
        return Ok(());
    }

    let shown = if limit > 0 {
        limit.min(candidates.len())
    } else {
        candidates.len()
    };

    for (index, candidate) in candidates.iter().take(shown).enumerate() {
        println!("{}. {candidate} [id {}]", index + 1, candidate.id);
        if let Some(poster) = &candidate.poster_url {
            println!("   poster: {poster}");
        }
    }

    if shown < candidates.len() {
        eprintln!("\nShowing {shown} of {} matches", candidates.len());
    }
    Ok(())
}

/// Handle fetching full details for the best-ranked match of a title
pub async fn handle_search_first(
    ctx: &AppContext,
    query: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = require_catalog(ctx)?;

    eprintln!("Looking up the best match for '{query}'...");
    let Some((candidate, details)) = catalog.resolve_first(query).await? else {
        eprintln!("No matches found for '{query}'");
        return Ok(());
    };

    println!("{candidate} [id {}]", candidate.id);
    println!("   genre: {}", details.genre);
    println!("   duration: {} minutes", details.duration_minutes);
    println!(
        "   poster: {}",
        candidate.poster_url.as_deref().unwrap_or("not available")
    );
    Ok(())
}
