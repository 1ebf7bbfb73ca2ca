//! Decode a nested wire payload into a flat record and print both shapes.

use wireform::{
    from_json, to_json, Decode, DecodeError, Encode, EncodeError, MapAccessor, MapBuilder,
    Path, Value,
};

const INPUT: &[u8] = br#"
{
    "userInfo": {
        "id": "109",
        "name": "Jerry Wang",
        "imageURLs": ["http://url1", "http://url2"],
        "bodyShape": {"weight": "100", "height": "1000"}
    }
}
"#;

/// Flat in-memory shape for the nested wire layout above.
#[derive(Debug)]
struct FlatUser {
    id: String,
    name: String,
    image_urls: Vec<String>,
    weight: String,
    height: String,
}

impl Decode for FlatUser {
    fn decode(value: &Value, path: &Path<'_>) -> Result<Self, DecodeError> {
        let root = MapAccessor::bind(value, *path)?;
        let info = root.nested_map("userInfo")?;
        let shape = info.nested_map("bodyShape")?;
        Ok(FlatUser {
            id: info.required("id")?,
            name: info.required("name")?,
            image_urls: info.required("imageURLs")?,
            weight: shape.required("weight")?,
            height: shape.required("height")?,
        })
    }
}

impl Encode for FlatUser {
    fn encode(&self) -> Result<Value, EncodeError> {
        let mut map = MapBuilder::new();
        map.field("id", &self.id)?;
        map.field("name", &self.name)?;
        map.field("imageURLs", &self.image_urls)?;
        map.field("weight", &self.weight)?;
        map.field("height", &self.height)?;
        Ok(map.build())
    }
}

fn main() {
    let user: FlatUser = from_json(INPUT).expect("decode failed");

    println!("=== Decoded (flat) ===");
    println!("id:     {}", user.id);
    println!("name:   {}", user.name);
    println!("images: {}", user.image_urls.len());
    println!("weight: {}", user.weight);
    println!("height: {}", user.height);

    let bytes = to_json(&user).expect("encode failed");
    println!("\n=== Re-encoded (flat wire shape) ===");
    println!("{}", String::from_utf8_lossy(&bytes));
}
