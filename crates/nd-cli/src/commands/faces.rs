use comfy_table::{ContentArrangement, Table};

use nd_engine::{Die, Face};

pub fn run(die: Option<&str>) -> Result<(), String> {
    match die {
        Some(name) => {
            let die = Die::from_name(name).ok_or_else(|| format!("unknown die: \"{name}\""))?;
            show_die(die);
        }
        None => show_all(),
    }
    Ok(())
}

fn show_all() {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Die", "Code", "Sides", "Faces"]);

    for die in Die::ALL {
        let faces: Vec<String> = die.faces().iter().map(face_code).collect();
        table.add_row(vec![
            die.to_string(),
            die.denomination().to_string(),
            die.face_count().to_string(),
            faces.join(" "),
        ]);
    }

    println!("{table}");
}

fn show_die(die: Die) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Face", "Symbols"]);

    for (i, face) in die.faces().iter().enumerate() {
        let symbols = if face.is_blank() {
            "blank".to_string()
        } else {
            face.symbols()
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(" + ")
        };
        table.add_row(vec![(i + 1).to_string(), symbols]);
    }

    println!("  {die} ({} sides)", die.face_count());
    println!("{table}");
}

fn face_code(face: &Face) -> String {
    if face.is_blank() {
        "-".to_string()
    } else {
        face.to_string()
    }
}
