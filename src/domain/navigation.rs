// Named-route table and the navigation stack
use super::EntityKind;
use crate::error::{HolonetError, Result};
use tracing::info;

/// Which of the two screen templates a route mounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    List,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    pub kind: EntityKind,
    pub screen: ScreenKind,
}

impl RouteDef {
    const fn new(name: &'static str, kind: EntityKind, screen: ScreenKind) -> Self {
        Self { name, kind, screen }
    }
}

/// Every registered route, one list and one detail per entity
pub const ROUTES: [RouteDef; 6] = [
    RouteDef::new("Planets", EntityKind::Planets, ScreenKind::List),
    RouteDef::new("PlanetDetail", EntityKind::Planets, ScreenKind::Detail),
    RouteDef::new("Films", EntityKind::Films, ScreenKind::List),
    RouteDef::new("FilmDetail", EntityKind::Films, ScreenKind::Detail),
    RouteDef::new("Spaceships", EntityKind::Starships, ScreenKind::List),
    RouteDef::new("SpaceshipDetail", EntityKind::Starships, ScreenKind::Detail),
];

pub fn lookup(name: &str) -> Option<&'static RouteDef> {
    ROUTES.iter().find(|r| r.name == name)
}

/// Parameters passed along with a navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavParams {
    pub url: Option<String>,
}

impl NavParams {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// A mounted route with its parameters resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List(EntityKind),
    Detail { kind: EntityKind, url: String },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::List(kind) => kind.config().list_route,
            Route::Detail { kind, .. } => kind.config().detail_route,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Route::List(kind) | Route::Detail { kind, .. } => *kind,
        }
    }

    fn resolve(def: &RouteDef, params: NavParams) -> Result<Self> {
        match def.screen {
            ScreenKind::List => Ok(Route::List(def.kind)),
            ScreenKind::Detail => {
                let url = params.url.ok_or(HolonetError::MissingParam("url"))?;
                Ok(Route::Detail {
                    kind: def.kind,
                    url,
                })
            }
        }
    }
}

/// Stack navigator; the top of the stack is the mounted screen
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    /// Creates a navigator whose root is the named route
    pub fn new(initial: &str, params: NavParams) -> Result<Self> {
        let def = lookup(initial)
            .ok_or_else(|| HolonetError::UnknownRoute(initial.to_string()))?;
        Ok(Self {
            stack: vec![Route::resolve(def, params)?],
        })
    }

    pub fn current(&self) -> &Route {
        // The stack is never emptied below its root
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Navigates to a named route.
    ///
    /// A list route already on the stack is returned to rather than pushed
    /// again; detail routes are always pushed.
    pub fn navigate(&mut self, name: &str, params: NavParams) -> Result<&Route> {
        let def = lookup(name)
            .ok_or_else(|| HolonetError::UnknownRoute(name.to_string()))?;
        let route = Route::resolve(def, params)?;

        if let Route::List(_) = route {
            if let Some(pos) = self.stack.iter().position(|r| *r == route) {
                self.stack.truncate(pos + 1);
                info!(route = name, depth = self.stack.len(), "Returned to route");
                return Ok(self.current());
            }
        }

        self.stack.push(route);
        info!(route = name, depth = self.stack.len(), "Navigated");
        Ok(self.current())
    }

    /// Pops the current route; returns `false` at the root
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.stack.pop();
        info!(route = self.current().name(), "Navigated back");
        true
    }

    /// Replaces the whole stack with an entity's list route
    pub fn reset_to(&mut self, kind: EntityKind) {
        self.stack.clear();
        self.stack.push(Route::List(kind));
        info!(route = kind.config().list_route, "Reset navigation stack");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooted_at(name: &str) -> Navigator {
        Navigator::new(name, NavParams::none()).unwrap()
    }

    #[test]
    fn test_route_table_covers_every_entity() {
        for kind in EntityKind::ALL {
            let config = kind.config();
            assert_eq!(lookup(config.list_route).unwrap().screen, ScreenKind::List);
            assert_eq!(lookup(config.detail_route).unwrap().screen, ScreenKind::Detail);
        }
    }

    #[test]
    fn test_detail_route_as_root() {
        let nav = Navigator::new("FilmDetail", NavParams::with_url("f1")).unwrap();
        assert_eq!(nav.current().kind(), EntityKind::Films);
        assert!(matches!(
            Navigator::new("FilmDetail", NavParams::none()),
            Err(HolonetError::MissingParam("url"))
        ));
    }

    #[test]
    fn test_initial_route() {
        let nav = Navigator::new("Planets", NavParams::none()).unwrap();
        assert_eq!(*nav.current(), Route::List(EntityKind::Planets));
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_unknown_route() {
        let err = Navigator::new("Droids", NavParams::none()).unwrap_err();
        assert!(matches!(err, HolonetError::UnknownRoute(_)));

        let mut nav = rooted_at("Films");
        assert!(nav.navigate("Vehicles", NavParams::none()).is_err());
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_detail_requires_url() {
        let mut nav = rooted_at("Planets");
        let err = nav.navigate("PlanetDetail", NavParams::none()).unwrap_err();
        assert!(matches!(err, HolonetError::MissingParam("url")));
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_navigate_to_detail_and_back() {
        let mut nav = rooted_at("Planets");
        let route = nav
            .navigate("PlanetDetail", NavParams::with_url("https://swapi.dev/api/planets/1/"))
            .unwrap()
            .clone();
        assert_eq!(
            route,
            Route::Detail {
                kind: EntityKind::Planets,
                url: "https://swapi.dev/api/planets/1/".to_string()
            }
        );
        assert_eq!(route.name(), "PlanetDetail");
        assert!(nav.go_back());
        assert_eq!(*nav.current(), Route::List(EntityKind::Planets));
        assert!(!nav.go_back());
    }

    #[test]
    fn test_navigate_to_list_on_stack_pops_back_to_it() {
        let mut nav = rooted_at("Planets");
        nav.navigate("PlanetDetail", NavParams::with_url("u1")).unwrap();
        nav.navigate("Films", NavParams::none()).unwrap();
        assert_eq!(nav.depth(), 3);
        nav.navigate("Planets", NavParams::none()).unwrap();
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_reset_to() {
        let mut nav = rooted_at("Planets");
        nav.navigate("PlanetDetail", NavParams::with_url("u1")).unwrap();
        nav.reset_to(EntityKind::Starships);
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current().name(), "Spaceships");
    }
}
