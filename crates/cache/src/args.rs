//! Resolves the rule engine's generic `(name, ArgMap)` compressor choice
//! into `compress`'s typed [`CompressorArgs`](compress::CompressorArgs).

use compress::{CompressorArgs, DeflateArgs, HeatshrinkArgs};
use image::ArgMap;

use crate::error::CacheError;

fn parse_u8(args: &ArgMap, key: &str) -> Option<u8> {
    args.get(key)?.as_deref()?.parse().ok()
}

/// Builds typed compressor arguments for `name`, falling back to each
/// compressor's documented default for any argument the rule didn't set.
pub fn resolve_compressor(name: &str, args: &ArgMap) -> Result<CompressorArgs, CacheError> {
    match name {
        "deflate" => {
            let level = parse_u8(args, "level").unwrap_or(DeflateArgs::default().level);
            Ok(CompressorArgs::Deflate(DeflateArgs { level }))
        }
        "heatshrink" => {
            let defaults = HeatshrinkArgs::default();
            let window = parse_u8(args, "window").unwrap_or(defaults.window);
            let lookahead = parse_u8(args, "lookahead").unwrap_or(defaults.lookahead);
            Ok(CompressorArgs::Heatshrink(HeatshrinkArgs { window, lookahead }))
        }
        other => Err(CacheError::UnknownCompressor {
            name: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_deflate_level_from_args() {
        let mut args = ArgMap::new();
        args.insert("level".to_owned(), Some("3".to_owned()));
        let resolved = resolve_compressor("deflate", &args).unwrap();
        match resolved {
            CompressorArgs::Deflate(a) => assert_eq!(a.level, 3),
            CompressorArgs::Heatshrink(_) => panic!("wrong variant"),
        }
    }

    #[test]
    fn falls_back_to_defaults_when_unset() {
        let resolved = resolve_compressor("heatshrink", &ArgMap::new()).unwrap();
        match resolved {
            CompressorArgs::Heatshrink(a) => {
                assert_eq!(a.window, HeatshrinkArgs::default().window);
                assert_eq!(a.lookahead, HeatshrinkArgs::default().lookahead);
            }
            CompressorArgs::Deflate(_) => panic!("wrong variant"),
        }
    }

    #[test]
    fn unknown_compressor_name_is_an_error() {
        let err = resolve_compressor("bogus", &ArgMap::new()).unwrap_err();
        assert!(matches!(err, CacheError::UnknownCompressor { .. }));
    }
}
