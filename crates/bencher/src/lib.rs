/// A request body used as benchmark input.
#[derive(Debug, Copy, Clone)]
pub struct BodyFixture {
    name: &'static str,
    content_type: &'static str,
    content: &'static str,
}

impl BodyFixture {
    pub const fn new(name: &'static str, content_type: &'static str, content: &'static str) -> Self {
        Self { name, content_type, content }
    }

    pub const fn form(name: &'static str, content: &'static str) -> Self {
        Self::new(name, "application/x-www-form-urlencoded", content)
    }

    pub const fn json(name: &'static str, content: &'static str) -> Self {
        Self::new(name, "application/json", content)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    /// Splits the content into chunks of at most `size` bytes, the way a transport would deliver it
    pub fn chunks(&self, size: usize) -> impl Iterator<Item = &'static [u8]> {
        self.content.as_bytes().chunks(size)
    }
}
