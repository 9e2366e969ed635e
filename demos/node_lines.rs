use clap::Parser;
use geo_topology::graph::{Edge, Label, Location};
use geo_topology::noding::extract_lines;
use geo_topology::EdgeNoder;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use std::convert::TryInto;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input GeoJSON file (LineStrings or Polygons)
    #[arg(short, long)]
    input: PathBuf,

    /// Output GeoJSON file (noded LineStrings)
    #[arg(short, long)]
    output: PathBuf,

    /// Skip validating the noded output
    #[arg(long, default_value_t = false)]
    no_validate: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Reading input from {:?}", args.input);
    let file = File::open(&args.input)?;
    let reader = BufReader::new(file);
    let geojson: GeoJson = serde_json::from_reader(reader)?;

    let mut lines = Vec::new();
    let mut feature_count = 0;

    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in fc.features {
                if let Some(geom) = feature.geometry {
                    let geo_geom: geo_types::Geometry<f64> = geom.try_into()?;
                    extract_lines(&geo_geom, &mut lines);
                    feature_count += 1;
                }
            }
        }
        GeoJson::Geometry(geom) => {
            let geo_geom: geo_types::Geometry<f64> = geom.try_into()?;
            extract_lines(&geo_geom, &mut lines);
            feature_count += 1;
        }
        GeoJson::Feature(feature) => {
            if let Some(geom) = feature.geometry {
                let geo_geom: geo_types::Geometry<f64> = geom.try_into()?;
                extract_lines(&geo_geom, &mut lines);
                feature_count += 1;
            }
        }
    }

    println!("Loaded {} features, {} lines. Noding...", feature_count, lines.len());

    let edges: Vec<Edge> = lines
        .into_iter()
        .map(|ls| Edge::from_line_string(ls, Label::line(0, Location::Interior)))
        .collect();

    let noder = EdgeNoder { validate_output: !args.no_validate };
    let split = noder.node(edges)?;

    println!("Split into {} edges.", split.len());
    if !args.no_validate {
        println!("Output validated as fully noded.");
    }

    let features: Vec<Feature> = split
        .iter()
        .map(|edge| {
            let geometry = Geometry::new(Value::from(&edge.line_string()));
            Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: None,
                foreign_members: None,
            }
        })
        .collect();

    let output_fc = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    let file = File::create(&args.output)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &GeoJson::FeatureCollection(output_fc))?;

    println!("Wrote output to {:?}", args.output);

    Ok(())
}
