// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command handlers. Each returns the JSON document printed on stdout.

use crate::form_input::parse_args;
use anyhow::{Context, Result, anyhow, bail};
use codec::{
    ArgField, Denomination, FormValue, FormValues, MetadataRegistry, decode_address, decode_all_args,
    encode_address, encode_all_args, encode_arg, explain_decomposition, from_planck, get_denominations,
    to_planck, validate_all_args,
};
use config::{Args, BuilderConfig, CallInput, CallTarget, Command};
use serde_json::{Map, Value, json};
use std::path::Path;

/// Type names whose decoded hex is shown in SS58 form as well.
const ACCOUNT_TYPES: [&str; 3] = ["AccountId32", "MultiAddress", "AccountId"];

pub fn run(args: &Args, settings: &BuilderConfig) -> Result<Value> {
    match &args.command {
        Command::Calls { pallet } => {
            let registry = load_registry(args, settings)?;
            list_calls(&registry, pallet.as_deref())
        }
        Command::Encode(input) => {
            let registry = load_registry(args, settings)?;
            let (fields, values) = call_input(&registry, input)?;
            Ok(serde_json::to_value(encode_all_args(&registry, &fields, &values))?)
        }
        Command::Decode { target, hex } => {
            let registry = load_registry(args, settings)?;
            let fields = call_fields(&registry, target)?;
            decode(&registry, &fields, hex, settings.chain.ss58_prefix)
        }
        Command::Decompose { input, field } => {
            let registry = load_registry(args, settings)?;
            let (fields, values) = call_input(&registry, input)?;
            decompose(&registry, &fields, &values, field)
        }
        Command::Validate(input) => {
            let registry = load_registry(args, settings)?;
            let (fields, values) = call_input(&registry, input)?;
            Ok(serde_json::to_value(validate_all_args(&registry, &fields, &values))?)
        }
        Command::ToPlanck { amount, unit } => {
            let denomination = denomination(settings, unit.as_deref())?;
            let planck = to_planck(amount, &denomination)?;
            Ok(json!({ "amount": amount, "unit": denomination.label, "planck": planck }))
        }
        Command::FromPlanck { planck, unit } => {
            let denomination = denomination(settings, unit.as_deref())?;
            let amount = from_planck(planck, &denomination);
            Ok(json!({ "planck": planck, "unit": denomination.label, "amount": amount }))
        }
    }
}

fn load_registry(args: &Args, settings: &BuilderConfig) -> Result<MetadataRegistry> {
    let path = args
        .metadata
        .as_deref()
        .or(settings.chain.metadata_path.as_deref())
        .ok_or_else(|| anyhow!("No metadata file given; pass --metadata or set PCB_CHAIN_METADATA_PATH"))?;
    read_registry(path)
}

fn read_registry(path: &Path) -> Result<MetadataRegistry> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read metadata file {}", path.display()))?;
    let registry = MetadataRegistry::from_metadata_bytes(&data)
        .with_context(|| format!("Failed to load metadata from {}", path.display()))?;
    tracing::info!(path = %path.display(), pallets = registry.pallets().len(), "Metadata loaded");
    Ok(registry)
}

fn call_fields(registry: &MetadataRegistry, target: &CallTarget) -> Result<Vec<ArgField>> {
    Ok(registry.call_fields(&target.pallet, &target.call)?)
}

fn call_input(registry: &MetadataRegistry, input: &CallInput) -> Result<(Vec<ArgField>, FormValues)> {
    let fields = call_fields(registry, &input.target)?;
    let values = parse_args(&input.args)?;

    if let Some(unknown) = values.keys().find(|name| !fields.iter().any(|f| &f.name == *name)) {
        let expected: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        bail!(
            "Call {}.{} has no argument '{unknown}' (expected: {})",
            input.target.pallet,
            input.target.call,
            expected.join(", ")
        );
    }
    Ok((fields, values))
}

fn list_calls(registry: &MetadataRegistry, pallet: Option<&str>) -> Result<Value> {
    let Some(pallet) = pallet else {
        return Ok(json!({ "pallets": registry.pallets() }));
    };

    let mut calls = Vec::new();
    for call in registry.calls(pallet)? {
        let args: Vec<Value> = registry
            .call_fields(pallet, &call)?
            .iter()
            .map(|f| json!({ "name": f.name, "type": registry.type_name(f.type_id), "typeId": f.type_id }))
            .collect();
        calls.push(json!({ "name": call, "args": args }));
    }
    Ok(json!({ "pallet": pallet, "calls": calls }))
}

fn decode(registry: &MetadataRegistry, fields: &[ArgField], hex: &str, ss58_prefix: u16) -> Result<Value> {
    let result = decode_all_args(registry, fields, hex);

    let mut addresses = Map::new();
    for field in fields {
        if !ACCOUNT_TYPES.contains(&registry.type_name(field.type_id).as_str()) {
            continue;
        }
        if let Some(Value::String(text)) = result.values.get(&field.name)
            && let Some(account) = decode_address(text)
        {
            addresses.insert(field.name.clone(), Value::String(encode_address(&account, ss58_prefix)));
        }
    }

    let mut output = serde_json::to_value(&result)?;
    if !addresses.is_empty()
        && let Value::Object(map) = &mut output
    {
        map.insert("addresses".to_string(), Value::Object(addresses));
    }
    Ok(output)
}

fn decompose(registry: &MetadataRegistry, fields: &[ArgField], values: &FormValues, name: &str) -> Result<Value> {
    let field = fields
        .iter()
        .find(|f| f.name == name)
        .ok_or_else(|| anyhow!("Unknown argument '{name}'"))?;
    let value = values.get(name).cloned().unwrap_or(FormValue::Null);

    let encoded = encode_arg(registry, field.type_id, &value);
    let decomposition = explain_decomposition(registry, field.type_id, &value, 0);
    if let Some(reason) = &decomposition.skipped {
        tracing::debug!(field = name, %reason, "Argument not decomposed");
    }

    Ok(json!({
        "field": name,
        "encoded": encoded,
        "tree": decomposition.node,
        "skipped": decomposition.skipped.map(|reason| reason.to_string()),
    }))
}

fn denomination(settings: &BuilderConfig, unit: Option<&str>) -> Result<Denomination> {
    let denominations = get_denominations(&settings.chain.symbol, settings.chain.decimals);
    let Some(unit) = unit else {
        return denominations
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No denominations available"));
    };

    let labels: Vec<String> = denominations.iter().map(|d| d.label.clone()).collect();
    let found = denominations
        .iter()
        .position(|d| d.label == unit)
        .or_else(|| denominations.iter().position(|d| d.label.eq_ignore_ascii_case(unit)));
    match found {
        Some(index) => Ok(denominations[index].clone()),
        None => bail!("Unknown unit '{unit}' (expected one of: {})", labels.join(", ")),
    }
}
