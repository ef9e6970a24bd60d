//! Renders a small in-memory sales aggregation as indented JSON and as
//! namespace-free XML.

use anyhow::Result;
use batch_import_rs::format::json::JsonExporterBuilder;
use batch_import_rs::format::xml::XmlExporterBuilder;
use serde::Serialize;

#[derive(Serialize)]
struct SellerProjection {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "SoldProducts")]
    sold_products: Vec<ProductProjection>,
}

#[derive(Serialize)]
struct ProductProjection {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Buyer", skip_serializing_if = "Option::is_none")]
    buyer: Option<String>,
}

fn catalog() -> Vec<SellerProjection> {
    vec![
        SellerProjection {
            name: "Almira Berger".to_string(),
            sold_products: vec![
                ProductProjection {
                    name: "Stainless Steel Gloves".to_string(),
                    price: "1033.74".to_string(),
                    buyer: Some("Ernest Caldwell".to_string()),
                },
                ProductProjection {
                    name: "Granite Keyboard".to_string(),
                    price: "512.00".to_string(),
                    buyer: None,
                },
            ],
        },
        SellerProjection {
            name: "Dora Hitchcock".to_string(),
            sold_products: vec![ProductProjection {
                name: "Wooden Chair".to_string(),
                price: "76.43".to_string(),
                buyer: Some("Petar Ivanov".to_string()),
            }],
        },
    ]
}

fn main() -> Result<()> {
    let sellers = catalog();

    let json_exporter = JsonExporterBuilder::new().build();
    println!("{}\n", json_exporter.export(&sellers)?);

    let xml_exporter = XmlExporterBuilder::new()
        .root_tag("Sellers")
        .item_tag("Seller")
        .indent(true)
        .build();
    println!("{}", xml_exporter.export(&sellers)?);

    Ok(())
}
