use log::error;
use recipe_planner::search::{limit_title, DEFAULT_TITLE_LIMIT};
use recipe_planner::{planner_from_config, Outcome, Planner, PlannerConfig};
use std::env;
use std::process;

const USAGE: &str = "Usage:
  recipe-planner search <query> [page]
  recipe-planner show <id> [servings]
  recipe-planner like <id>
  recipe-planner likes";

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().ok_or(USAGE)?;

    let config = PlannerConfig::load()?;
    let planner = planner_from_config(config)?;
    planner.load_favorites().await?;

    match command.as_str() {
        "search" => {
            let query = args.get(1).ok_or(USAGE)?;
            let page = args.get(2).and_then(|p| p.parse().ok()).unwrap_or(1);
            search(&planner, query, page).await
        }
        "show" => {
            let id = args.get(1).ok_or(USAGE)?;
            let servings = args.get(2).and_then(|s| s.parse().ok());
            show(&planner, id, servings).await
        }
        "like" => {
            let id = args.get(1).ok_or(USAGE)?;
            like(&planner, id).await
        }
        "likes" => {
            for favorite in planner.favorites().await {
                println!("{}  {} ({})", favorite.id, favorite.title, favorite.author);
            }
            Ok(())
        }
        _ => Err(USAGE.into()),
    }
}

async fn search(
    planner: &Planner,
    query: &str,
    page: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    if planner.search(query).await?.applied().is_none() {
        return Ok(());
    }

    let page = planner.search_page(page).await?;
    for recipe in &page.results {
        println!(
            "{:>8}  {:<22} {}",
            recipe.id,
            limit_title(&recipe.title, DEFAULT_TITLE_LIMIT),
            recipe.author
        );
    }
    println!("-- page {} of {}", page.number, page.total_pages);
    if page.has_previous {
        println!("   previous: recipe-planner search {} {}", query, page.number - 1);
    }
    if page.has_next {
        println!("   next: recipe-planner search {} {}", query, page.number + 1);
    }
    Ok(())
}

async fn show(
    planner: &Planner,
    id: &str,
    servings: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Outcome::Applied(snapshot) = planner.open_recipe(id).await? else {
        return Ok(());
    };

    let recipe = match servings {
        Some(servings) => planner.set_servings(servings).await?,
        None => snapshot.recipe,
    };

    let heart = if snapshot.liked { " ♥" } else { "" };
    println!("{}{}", recipe.title, heart);
    println!("by {}", recipe.author);
    println!(
        "{} minutes, {} servings",
        recipe.cook_time_minutes, recipe.servings
    );
    println!();
    for ingredient in &recipe.ingredients {
        println!("  - {}", ingredient);
    }
    if let Some(url) = &recipe.source_url {
        println!();
        println!("Directions: {}", url);
    }
    Ok(())
}

async fn like(planner: &Planner, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    if planner.open_recipe(id).await?.applied().is_none() {
        return Ok(());
    }

    let liked = planner.toggle_like().await?;
    if liked {
        println!("Liked {}", id);
    } else {
        println!("Removed {} from likes", id);
    }
    Ok(())
}
