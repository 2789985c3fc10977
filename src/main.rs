//! Interactive catalog browser.
//!
//! Reads commands from stdin and renders the grid, pagination, and detail
//! views as text. The summary file must exist before startup; its absence
//! is the one fatal, user-visible error.

use pokedex_catalog::catalog::{GenerationFilter, SortKey, TypeFilter};
use pokedex_catalog::display;
use pokedex_catalog::{CatalogSession, Config, PokemonType};
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let mut session = match CatalogSession::new(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Could not start the Pokedex: {}", e);
            std::process::exit(1);
        }
    };

    println!("Pokedex catalog ready. Type 'help' for commands.");
    if session.assist_enabled() {
        println!("Semantic search assist is enabled ('ask <query>').");
    }
    print_page(&session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Could not read input: {}", e);
                break;
            }
        }

        let input = line.trim();
        let (command, argument) = match input.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (input, ""),
        };

        match command {
            "" => {}
            "help" => print_help(),
            "list" => print_page(&session),
            "search" => {
                session.set_search_term(argument);
                print_page(&session);
            }
            "ask" => {
                if argument.is_empty() {
                    println!("Usage: ask <free-text query>");
                } else {
                    session.semantic_search(argument).await;
                    print_page(&session);
                }
            }
            "clear" => {
                session.set_search_term("");
                session.clear_semantic_keywords();
                session.set_type_filter(TypeFilter::All);
                session.set_generation_filter(GenerationFilter::All);
                print_page(&session);
            }
            "type" => {
                match parse_type_filter(argument) {
                    Some(filter) => {
                        session.set_type_filter(filter);
                        print_page(&session);
                    }
                    None => println!(
                        "Unknown type '{}'. Known types: {}",
                        argument,
                        session.type_names().join(", ")
                    ),
                }
            }
            "gen" => {
                if argument.is_empty() || argument == "all" {
                    session.set_generation_filter(GenerationFilter::All);
                } else {
                    session.set_generation_filter(GenerationFilter::Only(argument.to_string()));
                }
                print_page(&session);
            }
            "gens" => println!("Generations: {}", session.generations().join(", ")),
            "sort" => match parse_sort_key(argument) {
                Some(sort) => {
                    session.set_sort(sort);
                    print_page(&session);
                }
                None => println!("Usage: sort <id | id-desc | name | name-desc>"),
            },
            "next" => {
                if session.next_page() {
                    print_page(&session);
                } else {
                    println!("Already on the last page.");
                }
            }
            "prev" => {
                if session.prev_page() {
                    print_page(&session);
                } else {
                    println!("Already on the first page.");
                }
            }
            "show" => match resolve_id(&session, argument) {
                Some(id) => show_detail(&session, id).await,
                None => println!("Unknown Pokemon '{}'.", argument),
            },
            "fav" => match resolve_id(&session, argument) {
                Some(id) => {
                    if session.toggle_favorite(id) {
                        println!("Added {} to favorites.", display::format_pokemon_id(id));
                    } else {
                        println!("Removed {} from favorites.", display::format_pokemon_id(id));
                    }
                }
                None => println!("Unknown Pokemon '{}'.", argument),
            },
            "favs" => {
                let favorites = session.favorite_summaries();
                if favorites.is_empty() {
                    println!("No favorites yet. Use 'fav <id>' to add one.");
                } else {
                    for summary in favorites {
                        println!(
                            "* {} {}",
                            display::format_pokemon_id(summary.id),
                            summary.name
                        );
                    }
                }
            }
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help' for commands.", other),
        }
    }
}

fn print_help() {
    println!(
        "Commands:\n\
         \x20 list                 show the current page\n\
         \x20 search <text>        filter by name substring\n\
         \x20 ask <query>          semantic search (needs assist configured)\n\
         \x20 type <name | all>    filter by type\n\
         \x20 gen <label | all>    filter by generation\n\
         \x20 gens                 list generation labels\n\
         \x20 sort <id | id-desc | name | name-desc>\n\
         \x20 next / prev          page navigation\n\
         \x20 show <id | name>     open the detail view\n\
         \x20 fav <id | name>      toggle a favorite\n\
         \x20 favs                 list favorites\n\
         \x20 clear                reset all filters\n\
         \x20 quit"
    );
}

fn print_page(session: &CatalogSession) {
    let page = session.visible_page();
    let favorites: BTreeSet<u32> = page
        .items
        .iter()
        .filter(|s| session.is_favorite(s.id))
        .map(|s| s.id)
        .collect();
    print!("{}", display::render_grid(&page, &favorites));
    println!("{}", display::render_pagination(&page));
}

async fn show_detail(session: &CatalogSession, id: u32) {
    println!("Loading {}...", display::format_pokemon_id(id));
    match session.open_detail(id).await {
        Ok(view) => print!("{}", display::render_detail(&view, session.is_favorite(id))),
        Err(e) => println!("{}", e),
    }
}

/// Resolve an id or name argument against the loaded catalog. A numeric
/// argument only resolves if that id is actually loaded, so favorites
/// cannot accumulate ids the grid will never show.
fn resolve_id(session: &CatalogSession, argument: &str) -> Option<u32> {
    if argument.is_empty() {
        return None;
    }
    if let Ok(id) = argument.parse::<u32>() {
        return session.find_by_id(id).map(|s| s.id);
    }
    session.find_by_name(argument).map(|s| s.id)
}

fn parse_type_filter(argument: &str) -> Option<TypeFilter> {
    if argument.is_empty() || argument == "all" {
        return Some(TypeFilter::All);
    }
    PokemonType::from_api_name(argument).map(TypeFilter::Only)
}

fn parse_sort_key(argument: &str) -> Option<SortKey> {
    match argument {
        "id" => Some(SortKey::IdAscending),
        "id-desc" => Some(SortKey::IdDescending),
        "name" => Some(SortKey::NameAscending),
        "name-desc" => Some(SortKey::NameDescending),
        _ => None,
    }
}
