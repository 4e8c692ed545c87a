//! PokeAPI client. Best-effort: callers surface errors as status messages
//! and treat empty results as renderable states.

use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::state::{Entry, EntryStat};

const API_BASE: &str = "https://pokeapi.co/api/v2";
const DETAIL_CONCURRENCY: usize = 12;

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    types: Vec<TypeSlot>,
    stats: Vec<StatSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_info: TagRef,
}

#[derive(Clone, Debug, Deserialize)]
struct StatSlot {
    base_stat: u16,
    stat: TagRef,
}

#[derive(Clone, Debug, Deserialize)]
struct TagRef {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct AbilitiesResponse {
    abilities: Vec<AbilitySlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct AbilitySlot {
    ability: TagRef,
}

#[derive(Clone, Debug, Deserialize)]
struct MovesResponse {
    moves: Vec<MoveSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct MoveSlot {
    #[serde(rename = "move")]
    move_info: TagRef,
}

/// Fetch the catalog index and resolve every item's detail in a bounded
/// parallel fan-out. Index order is preserved; items that fail to resolve
/// are skipped.
pub async fn fetch_catalog(limit: usize) -> Result<Vec<Entry>, String> {
    let url = format!("{API_BASE}/pokemon?limit={limit}");
    let index: ListResponse = fetch_json(&url).await?;

    let semaphore = Arc::new(Semaphore::new(DETAIL_CONCURRENCY));
    let mut join_set = JoinSet::new();
    for (position, item) in index.results.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| "Catalog semaphore closed".to_string())?;
            let response: PokemonResponse = fetch_json(&item.url).await?;
            Ok::<(usize, Entry), String>((position, entry_from_response(response)))
        });
    }

    let mut entries: Vec<(usize, Entry)> = Vec::new();
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(Ok(indexed)) => entries.push(indexed),
            Ok(Err(_)) => {}
            Err(_) => {}
        }
    }

    entries.sort_by_key(|(position, _)| *position);
    Ok(entries.into_iter().map(|(_, entry)| entry).collect())
}

pub async fn fetch_abilities(name: &str) -> Result<Vec<String>, String> {
    let url = format!("{API_BASE}/pokemon/{name}");
    let response: AbilitiesResponse = fetch_json(&url).await?;
    Ok(response
        .abilities
        .into_iter()
        .map(|slot| slot.ability.name)
        .collect())
}

pub async fn fetch_moves(name: &str) -> Result<Vec<String>, String> {
    let url = format!("{API_BASE}/pokemon/{name}");
    let response: MovesResponse = fetch_json(&url).await?;
    Ok(response
        .moves
        .into_iter()
        .map(|slot| slot.move_info.name)
        .collect())
}

fn entry_from_response(response: PokemonResponse) -> Entry {
    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| EntryStat {
            name: slot.stat.name,
            value: slot.base_stat,
        })
        .collect();
    let artwork_url = response
        .sprites
        .pointer("/other/official-artwork/front_default")
        .and_then(|value| value.as_str())
        .map(|url| url.to_string());
    Entry {
        name: response.name,
        types,
        stats,
        artwork_url,
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let client = http_client();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    response.json().await.map_err(|err| err.to_string())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
