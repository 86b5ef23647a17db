use watchlog::{AppContext, MediaEntry};

/// Handle listing logged entries, most recent first
pub fn handle_list(
    ctx: &AppContext,
    limit: usize,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let limit = if limit > 0 { Some(limit) } else { None };
    let entries = ctx.store.list(limit)?;

    if entries.is_empty() {
        eprintln!("No media entries logged yet.");
        return Ok(());
    }

    for entry in &entries {
        output_entry(entry, json)?;
    }

    if !json {
        eprintln!("\n{} entries shown", entries.len());
    }
    Ok(())
}

/// Handle showing specific entries by id
pub fn handle_show(
    ctx: &AppContext,
    ids: &[i64],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut missing = Vec::new();

    for &id in ids {
        match ctx.store.get(id)? {
            Some(entry) => output_entry(&entry, json)?,
            None => missing.push(id),
        }
    }

    if !missing.is_empty() {
        let missing = missing
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        eprintln!("⚠️  No media entries with ids: {missing}");
    }
    Ok(())
}

fn output_entry(entry: &MediaEntry, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(entry)?);
    } else {
        println!("{entry}");
    }
    Ok(())
}
