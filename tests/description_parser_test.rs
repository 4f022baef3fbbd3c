// ==========================================
// DescriptionParser 集成测试
// ==========================================

mod helpers;

use helpers::test_data_builder::StageBuilder;
use obra_timeline::engine::parse_description;
use obra_timeline::{DescriptionParser, EngineConfig, ParsedItem};

fn item(title: Option<&str>, body: &str) -> ParsedItem {
    ParsedItem::new(title.map(str::to_string), body)
}

#[test]
fn test_parse_stage_instance_description() {
    let instance = StageBuilder::new("E3", "O1", "Motorización")
        .procurement(Some(30))
        .description(
            "(1) MOTOR: Yanmar 370hp. Este pedido es a aprox. 60 días. \
             (2) CAJA: ZF 286. (3) Hélice de bronce 4 palas.",
        )
        .build();

    let items = parse_description(instance.orden_compra_descripcion.as_deref());
    assert_eq!(
        items,
        vec![
            item(Some("MOTOR"), "Yanmar 370hp"),
            item(Some("CAJA"), "ZF 286"),
            item(None, "Hélice de bronce 4 palas"),
        ]
    );
}

#[test]
fn test_missing_description_yields_nothing() {
    let instance = StageBuilder::new("E1", "O1", "Casco").procurement(None).build();
    assert!(parse_description(instance.orden_compra_descripcion.as_deref()).is_empty());
}

#[test]
fn test_uppercase_title_gate() {
    let items = parse_description(Some("(1) MOTOR: Iveco 450hp. (2) Grupo: Kohler 9kva."));
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], item(Some("MOTOR"), "Iveco 450hp"));
    assert_eq!(items[1], item(None, "Grupo: Kohler 9kva"));
}

#[test]
fn test_title_column_limit_from_config() {
    let config = EngineConfig {
        title_max_column: 4,
        ..EngineConfig::default()
    };
    let parser = DescriptionParser::new(&config);

    let items = parser.parse(Some("(1) MOTOR: Iveco. (2) GPS: Garmin."));
    assert_eq!(
        items,
        vec![item(None, "MOTOR: Iveco"), item(Some("GPS"), "Garmin")]
    );
}

#[test]
fn test_notes_serialized_only_when_present() {
    let parser = DescriptionParser::default();
    let items = parser.parse_with_notes(Some(
        "(1) GRUPO: Kohler 9kva — instalación por el proveedor. (2) TANQUE: inox 400 l",
    ));

    let json = serde_json::to_value(&items).unwrap();
    assert_eq!(json[0]["title"], "GRUPO");
    assert_eq!(json[0]["nota"], "instalación por el proveedor");
    assert!(json[1].get("nota").is_none());
    assert_eq!(json[1]["body"], "inox 400 l");
}

#[test]
fn test_rendered_items_round_trip() {
    let items = parse_description(Some("(1) CASCO: PRFV. (2) Cubierta de teca."));
    let rendered: Vec<String> = items.iter().map(ParsedItem::render).collect();
    assert_eq!(rendered, vec!["CASCO: PRFV", "Cubierta de teca"]);
}
