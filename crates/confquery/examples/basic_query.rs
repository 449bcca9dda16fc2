use confquery::{CameraGrid, ConfQuery, DepthScene, VisualStyle};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <scene.json> <cameras.json> [image.png out_dir]",
            args[0]
        );
        std::process::exit(2);
    }

    let scene = DepthScene::from_json_file(Path::new(&args[1]))?;
    let grid = CameraGrid::from_json_file(Path::new(&args[2]))?;
    let query = ConfQuery::new(&grid, scene)?;

    println!("References: {}", query.reference_names().join(", "));
    for cfg in query.configurations() {
        println!("{} ({} objects)", cfg.label(), cfg.len());
        for (name, obj) in cfg.objects() {
            println!("  {name}: {obj}");
        }
    }

    if let (Some(image), Some(out)) = (args.get(3), args.get(4)) {
        let style = VisualStyle::default();
        let written = query.visualize_reference_objects(Path::new(image), Path::new(out), &style)?;
        println!("Wrote {} overlays to {out}", written.len());
    }
    Ok(())
}
