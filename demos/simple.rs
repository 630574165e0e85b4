use edifact_envelope::ast::EdiNode;
use edifact_envelope::context::SeparatorOverride;
use edifact_envelope::encode;

fn main() {
    let tree = r#"{
        "tag": "INTERCHANGE",
        "container": [
            { "tag": "UNB", "segment": [["UNOC", "3"], ["SENDER"], ["RECEIVER"], ["201018", "1200"], ["1"]] },
            { "tag": "GROUP", "container": [
                { "tag": "MESSAGE", "container": [
                    { "tag": "UNH", "segment": [["1"], ["ORDERS", "D", "96A", "UN"]] },
                    { "tag": "BGM", "segment": [["220"], ["PO-1"]] },
                    { "tag": "UNT", "segment": [["3"], ["1"]] }
                ]}
            ]},
            { "tag": "UNZ", "segment": [["1"], ["1"]] }
        ]
    }"#;

    let root: EdiNode = match serde_json::from_str(tree) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Invalid interchange tree: {e}");
            return;
        }
    };

    let overrides = SeparatorOverride {
        terminator: Some('~'),
        ..Default::default()
    };

    match encode(&root, Some(&overrides)) {
        Ok(result) => {
            println!("Successfully encoded interchange:\n{}", result.to_edi("\n"));
        }
        Err(e) => {
            eprintln!("Failed to encode interchange: {:?}", miette::Report::new(e));
        }
    }
}
