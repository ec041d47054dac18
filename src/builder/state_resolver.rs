//! Blockstate to model variant resolution.

use crate::error::{ResolverError, Result};
use crate::resolver::ResourceView;
use crate::resource_pack::{BlockstateDefinition, ModelVariant, MultipartCase};
use crate::types::BlockState;
use std::collections::{BTreeMap, HashMap};

/// Pick the model variants that apply to a block state.
pub fn resolve_variants(view: &ResourceView<'_>, block: &BlockState) -> Result<Vec<ModelVariant>> {
    let key = block.blockstate_key();
    let blockstate = view.blockstate(&key).ok_or_else(|| {
        ResolverError::BlockstateResolution(format!("No blockstate found for {}", key))
    })?;

    match blockstate {
        BlockstateDefinition::Variants(variants) => resolve_variant_map(variants, block),
        BlockstateDefinition::Multipart(cases) => resolve_multipart(cases, block),
    }
}

fn resolve_variant_map(
    variants: &HashMap<String, Vec<ModelVariant>>,
    block: &BlockState,
) -> Result<Vec<ModelVariant>> {
    let first = |list: &Vec<ModelVariant>| list.first().cloned().into_iter().collect::<Vec<_>>();

    if let Some(list) = variants.get(&block.property_string()) {
        return Ok(first(list));
    }
    if let Some(list) = variants.get("") {
        return Ok(first(list));
    }

    // Variant keys may name only some of the block's properties (slabs omit
    // `waterlogged`) or more of them than the caller gave. Among the keys that
    // do not contradict the block, prefer the most default-looking one.
    // Ties break on the key text so the choice is stable.
    let best = variants
        .iter()
        .filter(|(key, _)| key_consistent_with(key, &block.properties))
        .max_by(|(a, _), (b, _)| {
            unspecified_score(a, &block.properties)
                .cmp(&unspecified_score(b, &block.properties))
                .then_with(|| b.cmp(a))
        });

    match best {
        Some((_, list)) if !list.is_empty() => Ok(first(list)),
        _ => Err(ResolverError::BlockstateResolution(format!(
            "No matching variant for {}",
            block
        ))),
    }
}

fn resolve_multipart(cases: &[MultipartCase], block: &BlockState) -> Result<Vec<ModelVariant>> {
    let result: Vec<ModelVariant> = cases
        .iter()
        .filter(|case| {
            case.when
                .as_ref()
                .map_or(true, |condition| condition.matches(&block.properties))
        })
        .flat_map(|case| case.apply.as_slice().iter().cloned())
        .collect();

    if result.is_empty() {
        Err(ResolverError::BlockstateResolution(format!(
            "No multipart cases matched for {}",
            block
        )))
    } else {
        Ok(result)
    }
}

fn key_pairs(key: &str) -> impl Iterator<Item = (&str, &str)> {
    key.split(',').filter_map(|pair| pair.split_once('='))
}

fn key_consistent_with(key: &str, properties: &BTreeMap<String, String>) -> bool {
    key_pairs(key).all(|(prop, value)| properties.get(prop).map_or(true, |v| v == value))
}

fn unspecified_score(key: &str, properties: &BTreeMap<String, String>) -> i32 {
    key_pairs(key)
        .filter(|(prop, _)| !properties.contains_key(*prop))
        .map(|(prop, value)| default_score(prop, value))
        .sum()
}

/// How likely a property value is to be the block's default.
fn default_score(property: &str, value: &str) -> i32 {
    if let Ok(num) = value.parse::<i32>() {
        return -num * 10;
    }

    match (property, value) {
        ("axis", "y") => 50,
        ("half", "bottom" | "lower") => 50,
        ("half", "top" | "upper") => -50,
        ("type", "single" | "normal" | "bottom") => 50,
        ("type", "double" | "top") => -50,
        ("facing", "north") => 50,
        ("facing", "south") => 40,
        ("facing", "east") => 30,
        ("facing", "west") => 20,
        ("facing", "up") => 10,
        ("shape", "straight") => 50,
        ("north" | "south" | "east" | "west", "none" | "false") => 50,
        ("north" | "south" | "east" | "west", "tall" | "up") => -20,
        ("north" | "south" | "east" | "west", "true") => -50,
        (_, "false" | "off" | "none") => 100,
        (_, "true" | "on") => -100,
        _ => 0,
    }
}
