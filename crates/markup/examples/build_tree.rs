//! Build a small form from markup and print it

use dom::{Document, OutlineSerializer};
use markup::DocumentExt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let markup = std::env::args().nth(1).unwrap_or_else(|| {
        "div.card<id:'login'> { h1(Sign in) \
         form#form { text<name:user,placeholder:'Name, please'> password<name:pass> \
         checkbox#remember button.btn<onclick:'submit()'>(Go) } }"
            .to_string()
    });

    let mut doc = Document::new();
    let root = doc.root();
    doc.parse_markup(root, &markup)?;

    print!("{}", OutlineSerializer::new().serialize(&doc)?);

    for (key, id) in doc.registry().iter() {
        let serializer = OutlineSerializer::new();
        println!("#{} -> {}", key, serializer.generate_xpath(&doc, id)?);
    }

    Ok(())
}
