//! Decides what the map widget has to do when the store changes.
//!
//! The widget keeps its own zoom. It is centred on the origin when mounted
//! and follows the origin afterwards; destination changes only move the
//! destination marker.

use crate::location::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapCommand {
    Mount { center: Coordinate, zoom: u8 },
    PlaceOrigin(Coordinate),
    PlaceDestination(Coordinate),
    /// Pan to the coordinate, keeping the current zoom level.
    Recenter(Coordinate),
}

#[derive(Debug, Clone, Default)]
pub struct MapSync {
    rendered: Option<(Coordinate, Coordinate)>,
}

impl MapSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.rendered.is_some()
    }

    /// Commands that bring the widget in line with `origin`/`destination`.
    pub fn sync(&mut self, origin: Coordinate, destination: Coordinate, zoom: u8) -> Vec<MapCommand> {
        let mut commands = Vec::new();
        match self.rendered {
            None => {
                commands.push(MapCommand::Mount { center: origin, zoom });
                commands.push(MapCommand::PlaceOrigin(origin));
                commands.push(MapCommand::PlaceDestination(destination));
            }
            Some((prev_origin, prev_destination)) => {
                if prev_origin != origin {
                    commands.push(MapCommand::PlaceOrigin(origin));
                    commands.push(MapCommand::Recenter(origin));
                }
                if prev_destination != destination {
                    commands.push(MapCommand::PlaceDestination(destination));
                }
            }
        }
        self.rendered = Some((origin, destination));
        commands
    }

    /// Forget the rendered state, e.g. after the widget was torn down.
    pub fn reset(&mut self) {
        self.rendered = None;
    }
}
