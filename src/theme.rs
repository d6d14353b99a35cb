//! Color themes for the rendered chart.

pub struct Theme {
    pub bg: &'static str,
    pub text: &'static str,
    pub bar: &'static str,
}

pub const DRACULA: Theme = Theme {
    bg: "#282a36",
    text: "#f8f8f2",
    bar: "#bd93f9",
};

pub const LIGHT: Theme = Theme {
    bg: "#ffffff",
    text: "#000000",
    bar: "#4c71f2",
};

impl Theme {
    /// Look up a theme by name. Unknown names fall back to dracula.
    pub fn named(name: &str) -> &'static Theme {
        match name {
            "light" => &LIGHT,
            _ => &DRACULA,
        }
    }
}
