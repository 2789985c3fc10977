//! Text rendering for the catalog.
//!
//! Pure formatting functions over the session's state: the card grid, the
//! pagination line, and the detail view. Nothing here touches the network
//! or mutates state.

use crate::catalog::Page;
use crate::detail::DetailView;
use crate::effectiveness::TypeEffectiveness;
use schema::{PokemonSummary, PokemonType};
use std::collections::BTreeSet;

const STAT_BAR_MAX: u16 = 200;
const STAT_BAR_WIDTH: usize = 20;

pub fn format_pokemon_id(id: u32) -> String {
    format!("#{:03}", id)
}

/// Render one page of cards. Favorites carry a star marker.
pub fn render_grid(page: &Page<'_>, favorites: &BTreeSet<u32>) -> String {
    if page.items.is_empty() {
        return "No Pokemon match the current filters.\n".to_string();
    }

    let mut output = String::new();
    for summary in &page.items {
        output.push_str(&render_card_line(summary, favorites.contains(&summary.id)));
        output.push('\n');
    }
    output
}

fn render_card_line(summary: &PokemonSummary, is_favorite: bool) -> String {
    let marker = if is_favorite { "*" } else { " " };
    format!(
        "{} {} {:<12} [{}]",
        marker,
        format_pokemon_id(summary.id),
        summary.name,
        join_types(&summary.types)
    )
}

pub fn render_pagination(page: &Page<'_>) -> String {
    format!(
        "Page {} of {} ({} match{})",
        page.current_page,
        page.total_pages,
        page.total_matches,
        if page.total_matches == 1 { "" } else { "es" }
    )
}

/// Render the full detail view: header, measurements, description, stat
/// bars, evolution sequence, and effectiveness sections. Degraded
/// sections render their fallback text.
pub fn render_detail(view: &DetailView, is_favorite: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}{}\n",
        format_pokemon_id(view.id),
        view.name,
        if is_favorite { " *" } else { "" }
    ));
    output.push_str(&format!("Types: {}\n", join_types(&view.types)));
    output.push_str(&format!(
        "Height: {:.1} m   Weight: {:.1} kg\n",
        view.height as f64 / 10.0,
        view.weight as f64 / 10.0
    ));
    if let Some(sprite) = &view.sprite {
        output.push_str(&format!("Sprite: {}\n", sprite));
    }
    if let Some(shiny) = &view.sprite_shiny {
        output.push_str(&format!("Shiny:  {}\n", shiny));
    }

    output.push_str(&format!("\n{}\n", view.description));

    if !view.stats.is_empty() {
        output.push_str("\nBase stats:\n");
        for stat in &view.stats {
            let filled = (stat.base_value.min(STAT_BAR_MAX) as usize * STAT_BAR_WIDTH)
                / STAT_BAR_MAX as usize;
            output.push_str(&format!(
                "  {:<16} {:>3} {}\n",
                stat.name,
                stat.base_value,
                "#".repeat(filled)
            ));
        }
    }

    output.push_str("\nEvolution: ");
    match &view.evolution {
        Some(stages) if !stages.is_empty() => {
            let names: Vec<&str> = stages.iter().map(|s| s.name.as_str()).collect();
            output.push_str(&names.join(" -> "));
            output.push('\n');
        }
        _ => output.push_str("no evolution data\n"),
    }

    output.push_str(&render_effectiveness(&view.effectiveness));
    output
}

pub fn render_effectiveness(effectiveness: &TypeEffectiveness) -> String {
    if effectiveness.is_all_normal() {
        return "\nNormal effectiveness against all types.\n".to_string();
    }

    let mut output = String::new();
    render_type_set(&mut output, "Weak against", &effectiveness.weak);
    render_type_set(&mut output, "Resistant to", &effectiveness.resistant);
    render_type_set(&mut output, "Immune to", &effectiveness.immune);
    output
}

fn render_type_set(output: &mut String, title: &str, types: &BTreeSet<PokemonType>) {
    if types.is_empty() {
        return;
    }
    let names: Vec<String> = types.iter().map(|t| t.to_string()).collect();
    output.push_str(&format!("\n{}: {}\n", title, names.join(", ")));
}

fn join_types(types: &[PokemonType]) -> String {
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join("/")
}
