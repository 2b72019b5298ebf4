//! The subcommands of the `c55` tool. Each one produces a textual report.

use std::fmt::Write;

use anyhow::{Result, anyhow, bail};
use c55_core::{
    ContentId, FaceOwner, MapNode, MapNodePos, NodeAux, NodeSerializer, PackedDirection,
    face_contents, float_to_grid, grid_to_float,
};
use clap::Subcommand;
use glam::{I16Vec3, Vec3};
use log::{debug, warn};

use crate::settings::Settings;

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Print all properties of a content kind (given by name or number)
    Describe {
        #[arg(value_parser = parse_content)]
        content: ContentId,
    },
    /// Tell whether a face is drawn between two adjacent nodes and whose content it shows
    Face {
        #[arg(value_parser = parse_content)]
        first: ContentId,
        #[arg(value_parser = parse_content)]
        second: ContentId,
    },
    /// Encode a single node and print it as hex string
    Encode {
        #[arg(value_parser = parse_content)]
        content: ContentId,
        /// content-dependent parameter, e.g. the light level
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        param: i8,
        /// liquid pressure or packed direction
        #[arg(short, long, default_value_t = 0)]
        aux: u8,
        /// serialization format version (defaults to the configured one)
        #[arg(short, long)]
        format_version: Option<u8>,
    },
    /// Decode a single node from a hex string
    Decode {
        hex: String,
        /// serialization format version (defaults to the configured one)
        #[arg(short, long)]
        format_version: Option<u8>,
    },
    /// Pack a direction into a single byte
    PackDir {
        #[arg(allow_negative_numbers = true)]
        x: i16,
        #[arg(allow_negative_numbers = true)]
        y: i16,
        #[arg(allow_negative_numbers = true)]
        z: i16,
    },
    /// Unpack a direction byte
    UnpackDir { byte: u8 },
    /// Convert a world position into the position of the containing node
    ToGrid {
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        y: f32,
        #[arg(allow_negative_numbers = true)]
        z: f32,
    },
    /// Convert a node position into the world position of its center
    ToWorld {
        #[arg(allow_negative_numbers = true)]
        x: i16,
        #[arg(allow_negative_numbers = true)]
        y: i16,
        #[arg(allow_negative_numbers = true)]
        z: i16,
    },
}

fn parse_content(value: &str) -> Result<ContentId, String> {
    value.parse().map_err(|_| {
        let names: Vec<_> = ContentId::REGISTERED.iter().map(|(_, name)| *name).collect();
        format!(
            "expected a content id from 0 to 255 or one of: {}",
            names.join(", ")
        )
    })
}

impl Command {
    pub(crate) fn run(&self, settings: &Settings) -> Result<String> {
        debug!("running {self:?}");
        let serializer = NodeSerializer::new(settings.versions);
        let report = match *self {
            Command::Describe { content } => describe_content(content)?,
            Command::Face { first, second } => describe_face(first, second)?,
            Command::Encode {
                content,
                param,
                aux,
                format_version,
            } => {
                let version = format_version.unwrap_or(settings.default_version);
                let node = MapNode::new(content, param, aux);
                encode(&serializer, &node, version)?
            }
            Command::Decode {
                ref hex,
                format_version,
            } => {
                let version = format_version.unwrap_or(settings.default_version);
                decode(&serializer, hex, version)?
            }
            Command::PackDir { x, y, z } => {
                let packed = PackedDirection::pack(I16Vec3::new(x, y, z));
                let raw = u8::from(packed);
                format!("{raw} (0b{raw:06b})\n")
            }
            Command::UnpackDir { byte } => {
                let packed = PackedDirection::from_raw(byte);
                if !packed.is_canonical() {
                    warn!("{byte:#04x} is not a canonical direction");
                }
                format!("{}\n", MapNodePos(packed.unpack()))
            }
            Command::ToGrid { x, y, z } => format!("{}\n", float_to_grid(Vec3::new(x, y, z))),
            Command::ToWorld { x, y, z } => {
                let world = grid_to_float(MapNodePos(I16Vec3::new(x, y, z)));
                format!("({}, {}, {})\n", world.x, world.y, world.z)
            }
        };
        Ok(report)
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn describe_content(content: ContentId) -> Result<String> {
    let features = content.features();
    let mut report = String::new();
    writeln!(report, "content:             {content} ({})", content.0)?;
    writeln!(report, "tile:                {}", features.tile)?;
    writeln!(
        report,
        "solidness:           {} ({})",
        features.solidness,
        u8::from(features.solidness)
    )?;
    writeln!(report, "light source:        {}", features.light_source)?;
    for (label, value) in [
        ("light propagates", features.light_propagates()),
        ("sunlight propagates", features.sunlight_propagates()),
        ("walkable", features.walkable()),
        ("liquid", features.liquid()),
        ("pointable", features.pointable()),
        ("diggable", features.diggable()),
        ("buildable to", features.buildable_to()),
        ("ground content", features.is_ground_content()),
        ("directional", features.directional()),
        ("liquid replaces", features.liquid_replaces()),
    ] {
        writeln!(report, "{:<21}{}", format!("{label}:"), yes_no(value))?;
    }
    writeln!(report, "aux byte:            {:?}", features.aux_kind())?;
    Ok(report)
}

fn describe_face(first: ContentId, second: ContentId) -> Result<String> {
    let owner = face_contents(first, second);
    let code = u8::from(owner);
    Ok(match owner {
        FaceOwner::None => format!("no face ({code})\n"),
        FaceOwner::First => format!("face shows {first} ({code})\n"),
        FaceOwner::Second => format!("face shows {second} ({code})\n"),
    })
}

fn describe_node(node: &MapNode) -> Result<String> {
    let mut report = String::new();
    writeln!(
        report,
        "content: {} ({})",
        node.content_id, node.content_id.0
    )?;
    writeln!(report, "param:   {} ({:#04x})", node.param, node.param_byte())?;
    writeln!(report, "light:   {}", node.light())?;
    match node.aux() {
        NodeAux::Unused(raw) => writeln!(report, "aux:     unused ({raw:#04x})")?,
        NodeAux::Pressure(pressure) => writeln!(report, "aux:     pressure {pressure}")?,
        NodeAux::Direction(direction) => writeln!(
            report,
            "aux:     direction {}",
            MapNodePos(direction.unpack())
        )?,
    }
    Ok(report)
}

fn encode(serializer: &NodeSerializer, node: &MapNode, version: u8) -> Result<String> {
    let length = serializer.serialized_length(version)?;
    if node.aux_raw() != 0 && length < 3 {
        warn!("the aux byte is not part of format version {version} and will be dropped");
    }
    let mut buffer = vec![0_u8; length];
    serializer.serialize(node, &mut buffer, version)?;
    Ok(format!("{}\n", encode_hex(&buffer)))
}

fn decode(serializer: &NodeSerializer, hex: &str, version: u8) -> Result<String> {
    let bytes = decode_hex(hex)?;
    let node = serializer.deserialize(&bytes, version)?;
    let length = serializer.serialized_length(version)?;
    if bytes.len() > length {
        warn!(
            "ignoring {} trailing bytes; format version {version} uses {length}",
            bytes.len() - length
        );
    }
    describe_node(&node)
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::new(), |mut hex, byte| {
        // writing into a `String` never fails
        let _ignored = write!(hex, "{byte:02x}");
        hex
    })
}

fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = hex
        .chars()
        .filter(|digit| !digit.is_whitespace())
        .map(|digit| {
            digit
                .to_digit(16)
                .and_then(|value| u8::try_from(value).ok())
                .ok_or_else(|| anyhow!("invalid hex digit `{digit}`"))
        })
        .collect::<Result<_>>()?;

    let pairs = digits.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        bail!("hex string must have an even number of digits");
    }
    Ok(pairs
        .map(|pair| pair.iter().fold(0, |byte, digit| (byte << 4) | digit))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(command: Command) -> String {
        command.run(&Settings::default()).unwrap()
    }

    #[test]
    fn hex() {
        assert_eq!(encode_hex(&[0x03, 0x00, 0xfe]), "0300fe");
        assert_eq!(decode_hex("0300fe").unwrap(), vec![0x03, 0x00, 0xfe]);
        assert_eq!(decode_hex("03 00 FE").unwrap(), vec![0x03, 0x00, 0xfe]);
        assert!(decode_hex("030").is_err());
        assert!(decode_hex("0g").is_err());
    }

    #[test]
    fn parse_content_by_name_or_number() {
        assert_eq!(parse_content("ocean"), Ok(ContentId::OCEAN));
        assert_eq!(parse_content("254"), Ok(ContentId::AIR));
        assert!(parse_content("lava").unwrap_err().contains("stone"));
    }

    #[test]
    fn describe() {
        let report = run(Command::Describe {
            content: ContentId::LIGHT,
        });
        assert!(report.starts_with("content:             light (3)\n"));
        assert!(report.contains("tile:                air\n"));
        assert!(report.contains("solidness:           opaque (2)\n"));
        assert!(report.contains("light source:        14\n"));
        assert!(report.contains("walkable:            no\n"));
        assert!(report.contains("directional:         yes\n"));
        assert!(report.contains("aux byte:            Direction\n"));
    }

    #[test]
    fn face() {
        assert_eq!(
            run(Command::Face {
                first: ContentId::AIR,
                second: ContentId::STONE
            }),
            "face shows stone (2)\n"
        );
        assert_eq!(
            run(Command::Face {
                first: ContentId::IGNORE,
                second: ContentId::STONE
            }),
            "no face (0)\n"
        );
    }

    #[test]
    fn encode_and_decode() {
        let encoded = run(Command::Encode {
            content: ContentId::WATER,
            param: 7,
            aux: 3,
            format_version: None,
        });
        assert_eq!(encoded, "020703\n");

        let decoded = run(Command::Decode {
            hex: "020703".to_owned(),
            format_version: None,
        });
        assert_eq!(
            decoded,
            "content: water (2)\nparam:   7 (0x07)\nlight:   7\naux:     pressure 3\n"
        );
    }

    #[test]
    fn decode_direction() {
        let decoded = run(Command::Decode {
            hex: "030004".to_owned(),
            format_version: Some(10),
        });
        assert!(decoded.contains("light:   14\n"));
        assert!(decoded.ends_with("aux:     direction (0, 1, 0)\n"));
    }

    #[test]
    fn old_versions() {
        let encoded = run(Command::Encode {
            content: ContentId::WATER,
            param: 7,
            aux: 3,
            format_version: Some(0),
        });
        assert_eq!(encoded, "02\n");

        let decoded = run(Command::Decode {
            hex: "0207".to_owned(),
            format_version: Some(1),
        });
        assert!(decoded.contains("param:   0 (0x00)\n"));
    }

    #[test]
    fn unsupported_version() {
        let result = Command::Encode {
            content: ContentId::STONE,
            param: 0,
            aux: 0,
            format_version: Some(11),
        }
        .run(&Settings::default());
        assert!(result.is_err());
    }

    #[test]
    fn directions() {
        assert_eq!(run(Command::PackDir { x: 1, y: -1, z: 0 }), "9 (0b001001)\n");
        assert_eq!(run(Command::UnpackDir { byte: 9 }), "(1, -1, 0)\n");
    }

    #[test]
    fn positions() {
        assert_eq!(
            run(Command::ToGrid {
                x: 15.0,
                y: -15.0,
                z: 4.0
            }),
            "(2, -2, 0)\n"
        );
        assert_eq!(
            run(Command::ToWorld { x: 1, y: -2, z: 0 }),
            "(10, -20, 0)\n"
        );
    }
}
