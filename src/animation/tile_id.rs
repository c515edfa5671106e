#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, PartialOrd, Ord)]
pub struct TileID {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl TileID {
    pub fn new(x: u32, y: u32, z: u32) -> TileID {
        TileID { x, y, z }
    }

    /// Fills `{x}`, `{y}` and `{z}` in a frame URL template.
    pub fn request_url(&self, url_template: &str) -> String {
        url_template
            .replace("{x}", self.x.to_string().as_ref())
            .replace("{y}", self.y.to_string().as_ref())
            .replace("{z}", self.z.to_string().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_placeholder() {
        let tile = TileID::new(163, 395, 10);
        assert_eq!(
            tile.request_url("https://radar.example/t0/{z}/{x}/{y}.png?z={z}"),
            "https://radar.example/t0/10/163/395.png?z=10"
        );
    }

    #[test]
    fn leaves_templates_without_placeholders_alone() {
        let tile = TileID::new(1, 2, 3);
        assert_eq!(tile.request_url("https://static/tile.png"), "https://static/tile.png");
    }
}
