//! Converts extracted string values into typed [`BoundValue`]s via a named
//! converter registry.

use std::collections::HashMap;
use std::sync::Arc;

use wf_pattern::{CompiledRoute, OptionSpec, SegmentSpec};

use crate::error::TypeConversionError;
use crate::types::{BoundArguments, BoundValue, ExtractedValue, ExtractedValues};

type ConverterFn = Arc<dyn Fn(&str) -> Result<BoundValue, String> + Send + Sync>;

/// A process-wide registry of named type converters.
///
/// Initialized with the built-in types (`int`, `uint`, the fixed-width
/// signed/unsigned integers `i8`..`i64`/`u8`..`u64`, `float`, `bool`,
/// `timestamp`, `duration`, `uuid`) before any route is bound; applications
/// register additional converters (including enums) before building routes.
#[derive(Clone)]
pub struct ConverterRegistry {
	converters: HashMap<String, ConverterFn>,
}

impl Default for ConverterRegistry {
	fn default() -> Self {
		let mut registry = Self {
			converters: HashMap::new(),
		};
		registry.register("int", |raw| raw.parse::<i64>().map(BoundValue::Int).map_err(|e| e.to_string()));
		registry.register("uint", |raw| raw.parse::<u64>().map(BoundValue::UInt).map_err(|e| e.to_string()));
		registry.register("i8", |raw| raw.parse::<i8>().map(|v| BoundValue::Int(v as i64)).map_err(|e| e.to_string()));
		registry.register("i16", |raw| raw.parse::<i16>().map(|v| BoundValue::Int(v as i64)).map_err(|e| e.to_string()));
		registry.register("i32", |raw| raw.parse::<i32>().map(|v| BoundValue::Int(v as i64)).map_err(|e| e.to_string()));
		registry.register("i64", |raw| raw.parse::<i64>().map(BoundValue::Int).map_err(|e| e.to_string()));
		registry.register("u8", |raw| raw.parse::<u8>().map(|v| BoundValue::UInt(v as u64)).map_err(|e| e.to_string()));
		registry.register("u16", |raw| raw.parse::<u16>().map(|v| BoundValue::UInt(v as u64)).map_err(|e| e.to_string()));
		registry.register("u32", |raw| raw.parse::<u32>().map(|v| BoundValue::UInt(v as u64)).map_err(|e| e.to_string()));
		registry.register("u64", |raw| raw.parse::<u64>().map(BoundValue::UInt).map_err(|e| e.to_string()));
		registry.register("float", |raw| raw.parse::<f64>().map(BoundValue::Float).map_err(|e| e.to_string()));
		registry.register("bool", parse_bool);
		registry.register("timestamp", parse_timestamp);
		registry.register("duration", parse_duration);
		registry.register("uuid", |raw| uuid::Uuid::parse_str(raw).map(BoundValue::Uuid).map_err(|e| e.to_string()));
		registry
	}
}

impl ConverterRegistry {
	/// Registers a converter under `type_name`, replacing any existing one.
	pub fn register(&mut self, type_name: impl Into<String>, converter: impl Fn(&str) -> Result<BoundValue, String> + Send + Sync + 'static) {
		self.converters.insert(type_name.into(), Arc::new(converter));
	}

	/// Registers an enum type matched case-insensitively against `variants`.
	/// The returned value preserves the casing declared in `variants`.
	pub fn register_enum(&mut self, type_name: impl Into<String>, variants: &[&str]) {
		let variants: Vec<String> = variants.iter().map(|v| v.to_string()).collect();
		self.register(type_name, move |raw: &str| {
			variants
				.iter()
				.find(|v| v.eq_ignore_ascii_case(raw))
				.cloned()
				.map(BoundValue::Enum)
				.ok_or_else(|| format!("{raw:?} is not one of {variants:?}"))
		});
	}

	fn convert(&self, type_name: Option<&str>, raw: &str) -> Result<BoundValue, String> {
		match type_name {
			None => Ok(BoundValue::Str(raw.to_string())),
			Some(name) => match self.converters.get(name) {
				Some(converter) => converter(raw),
				None => Err(format!("unknown type {name:?}")),
			},
		}
	}
}

fn parse_bool(raw: &str) -> Result<BoundValue, String> {
	match raw.to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" => Ok(BoundValue::Bool(true)),
		"false" | "0" | "no" => Ok(BoundValue::Bool(false)),
		_ => Err(format!("{raw:?} is not a recognized boolean")),
	}
}

fn parse_timestamp(raw: &str) -> Result<BoundValue, String> {
	chrono::DateTime::parse_from_rfc3339(raw)
		.map(|dt| BoundValue::Timestamp(dt.with_timezone(&chrono::Utc)))
		.map_err(|e| e.to_string())
}

fn parse_duration(raw: &str) -> Result<BoundValue, String> {
	let s = raw.trim();
	let duration = if let Some(rest) = s.strip_prefix('P') {
		parse_iso8601_duration(rest)?
	} else {
		parse_units(s, &[('d', 86_400), ('h', 3_600), ('m', 60), ('s', 1)])?
	};
	Ok(BoundValue::Duration(duration))
}

fn parse_iso8601_duration(rest: &str) -> Result<chrono::Duration, String> {
	let (date_part, time_part) = match rest.split_once('T') {
		Some((d, t)) => (d, Some(t)),
		None => (rest, None),
	};
	let mut total = parse_units(date_part, &[('D', 86_400)])?;
	if let Some(t) = time_part {
		total = total + parse_units(t, &[('H', 3_600), ('M', 60), ('S', 1)])?;
	}
	Ok(total)
}

fn parse_units(s: &str, units: &[(char, i64)]) -> Result<chrono::Duration, String> {
	let mut total = chrono::Duration::zero();
	let mut number = String::new();
	for c in s.chars() {
		if c.is_ascii_digit() || c == '.' {
			number.push(c);
			continue;
		}
		if number.is_empty() {
			return Err(format!("duration unit {c:?} has no preceding number"));
		}
		let value: f64 = number.parse().map_err(|_| format!("invalid duration component {number:?}"))?;
		number.clear();
		let (_, seconds) = units
			.iter()
			.find(|(unit, _)| *unit == c)
			.ok_or_else(|| format!("unknown duration unit {c:?}"))?;
		total = total + chrono::Duration::milliseconds((value * *seconds as f64 * 1000.0) as i64);
	}
	if !number.is_empty() {
		return Err(format!("trailing duration digits without a unit: {number:?}"));
	}
	Ok(total)
}

/// Converts every extracted value named by `route`'s segments into a typed
/// [`BoundArguments`].
pub fn bind(route: &CompiledRoute, extracted: &ExtractedValues, registry: &ConverterRegistry) -> Result<BoundArguments, TypeConversionError> {
	let mut bound = HashMap::new();

	for segment in &route.segments {
		match segment {
			SegmentSpec::Literal { .. } => {}
			SegmentSpec::Parameter { name, ty, .. } => {
				let value = extracted.get(name).cloned().unwrap_or(ExtractedValue::Absent);
				bound.insert(name.clone(), convert_extracted(name, ty.as_deref(), value, registry)?);
			}
			SegmentSpec::Option(opt) => bind_option(opt, extracted, registry, &mut bound)?,
		}
	}

	Ok(BoundArguments(bound))
}

fn bind_option(
	opt: &OptionSpec,
	extracted: &ExtractedValues,
	registry: &ConverterRegistry,
	bound: &mut HashMap<String, BoundValue>,
) -> Result<(), TypeConversionError> {
	let key = opt.value_param.clone().unwrap_or_else(|| opt.long_form.clone());
	let value = extracted.get(&opt.long_form).cloned().unwrap_or(ExtractedValue::Absent);

	if !opt.expects_value {
		let present = matches!(value, ExtractedValue::Flag(true));
		bound.insert(key, BoundValue::Bool(present));
		return Ok(());
	}

	bound.insert(key.clone(), convert_extracted(&key, opt.value_type.as_deref(), value, registry)?);
	Ok(())
}

fn convert_extracted(name: &str, ty: Option<&str>, value: ExtractedValue, registry: &ConverterRegistry) -> Result<BoundValue, TypeConversionError> {
	match value {
		ExtractedValue::Absent => Ok(BoundValue::Absent),
		ExtractedValue::Flag(present) => Ok(BoundValue::Bool(present)),
		ExtractedValue::Single(raw) => registry.convert(ty, &raw).map_err(|_| TypeConversionError {
			param: name.to_string(),
			raw: raw.clone(),
			target: ty.unwrap_or("string").to_string(),
		}),
		ExtractedValue::Many(raws) => {
			let mut values = Vec::with_capacity(raws.len());
			for raw in &raws {
				let converted = registry.convert(ty, raw).map_err(|_| TypeConversionError {
					param: name.to_string(),
					raw: raw.clone(),
					target: ty.unwrap_or("string").to_string(),
				})?;
				values.push(converted);
			}
			Ok(BoundValue::List(values))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn converts_builtin_scalar_types() {
		let registry = ConverterRegistry::default();
		assert_eq!(registry.convert(Some("int"), "42").unwrap(), BoundValue::Int(42));
		assert_eq!(registry.convert(Some("uint"), "7").unwrap(), BoundValue::UInt(7));
		assert_eq!(registry.convert(Some("bool"), "yes").unwrap(), BoundValue::Bool(true));
		assert_eq!(registry.convert(Some("bool"), "0").unwrap(), BoundValue::Bool(false));
		assert!(registry.convert(Some("int"), "three").is_err());
	}

	#[test]
	fn converts_fixed_width_integers() {
		let registry = ConverterRegistry::default();
		assert_eq!(registry.convert(Some("i32"), "-42").unwrap(), BoundValue::Int(-42));
		assert_eq!(registry.convert(Some("u8"), "255").unwrap(), BoundValue::UInt(255));
		assert!(registry.convert(Some("u8"), "256").is_err());
		assert!(registry.convert(Some("i16"), "40000").is_err());
	}

	#[test]
	fn converts_untyped_as_string() {
		let registry = ConverterRegistry::default();
		assert_eq!(registry.convert(None, "hello").unwrap(), BoundValue::Str("hello".into()));
	}

	#[test]
	fn converts_uuid() {
		let registry = ConverterRegistry::default();
		let value = registry.convert(Some("uuid"), "550e8400-e29b-41d4-a716-446655440000").unwrap();
		assert!(matches!(value, BoundValue::Uuid(_)));
	}

	#[test]
	fn converts_shorthand_duration() {
		let registry = ConverterRegistry::default();
		let value = registry.convert(Some("duration"), "1d2h3m4s").unwrap();
		match value {
			BoundValue::Duration(d) => assert_eq!(d.num_seconds(), 86_400 + 2 * 3600 + 3 * 60 + 4),
			other => panic!("expected duration, got {other:?}"),
		}
	}

	#[test]
	fn converts_iso8601_duration() {
		let registry = ConverterRegistry::default();
		let value = registry.convert(Some("duration"), "PT1H30M").unwrap();
		match value {
			BoundValue::Duration(d) => assert_eq!(d.num_seconds(), 3600 + 1800),
			other => panic!("expected duration, got {other:?}"),
		}
	}

	#[test]
	fn enum_converter_matches_case_insensitively() {
		let mut registry = ConverterRegistry::default();
		registry.register_enum("status", &["Active", "Inactive"]);
		assert_eq!(registry.convert(Some("status"), "active").unwrap(), BoundValue::Enum("Active".into()));
		assert!(registry.convert(Some("status"), "bogus").is_err());
	}
}
