use super::FallbackMetrics;

/// Semantic text roles of the card. Each role has its own face and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Name,
    Handle,
    Meta,
    Text,
    Action,
    Cta,
    Initials,
}

impl FontRole {
    pub const ALL: [FontRole; 7] = [
        FontRole::Name,
        FontRole::Handle,
        FontRole::Meta,
        FontRole::Text,
        FontRole::Action,
        FontRole::Cta,
        FontRole::Initials,
    ];

    /// Pixel size at 72 DPI
    pub fn size(self) -> f32 {
        match self {
            FontRole::Name | FontRole::Text | FontRole::Initials => 28.0,
            FontRole::Handle | FontRole::Meta => 22.0,
            FontRole::Action | FontRole::Cta => 20.0,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontRole::Name | FontRole::Cta | FontRole::Initials)
    }

    /// CSS font-weight used by the markup outputs
    pub fn weight(self) -> u16 {
        match self {
            FontRole::Name | FontRole::Initials => 700,
            FontRole::Cta => 600,
            _ => 400,
        }
    }
}

/// One face per role.
///
/// A set is built at the start of a render and dropped when the render
/// returns, on success and error paths alike. Sets are never cached.
#[derive(Debug)]
pub struct FontSet<F> {
    pub name: F,
    pub handle: F,
    pub meta: F,
    pub text: F,
    pub action: F,
    pub cta: F,
    pub initials: F,
}

impl<F> FontSet<F> {
    /// Builds every role in `FontRole::ALL` order, stopping at the first failure
    pub fn try_build<E>(mut load: impl FnMut(FontRole) -> Result<F, E>) -> Result<Self, E> {
        Ok(Self {
            name: load(FontRole::Name)?,
            handle: load(FontRole::Handle)?,
            meta: load(FontRole::Meta)?,
            text: load(FontRole::Text)?,
            action: load(FontRole::Action)?,
            cta: load(FontRole::Cta)?,
            initials: load(FontRole::Initials)?,
        })
    }

    pub fn get(&self, role: FontRole) -> &F {
        match role {
            FontRole::Name => &self.name,
            FontRole::Handle => &self.handle,
            FontRole::Meta => &self.meta,
            FontRole::Text => &self.text,
            FontRole::Action => &self.action,
            FontRole::Cta => &self.cta,
            FontRole::Initials => &self.initials,
        }
    }
}

impl FontSet<FallbackMetrics> {
    /// Heuristic faces at the role sizes
    pub fn fallback() -> Self {
        match Self::try_build(|role| Ok::<_, std::convert::Infallible>(FallbackMetrics::new(role.size()))) {
            Ok(set) => set,
            Err(never) => match never {},
        }
    }
}

impl<F> Drop for FontSet<F> {
    fn drop(&mut self) {
        log::debug!("font set released");
    }
}
