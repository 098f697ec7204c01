//! Implements the setup phase of the board and the spawning of piece visuals.
use std::collections::HashMap;

use tracing::info;

use crate::{
    board::{
        rectangular::{Cell, RectDimensions, STANDARD_SIZE},
        Board, CannotPlaceReason, PlaceError, SetupError,
    },
    layout::BoardLayout,
    pieces::{PieceKind, Team},
    presentation::Presentation,
};

/// Back rank of the standard layout, from `x == 0` to `x == 7`.
pub const BACK_RANK: [PieceKind; STANDARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Explicit mapping from piece kinds to templates and from teams to materials.
#[derive(Debug, Clone)]
pub struct AssetCatalog<T, M> {
    templates: HashMap<PieceKind, T>,
    materials: HashMap<Team, M>,
}

impl<T, M> AssetCatalog<T, M> {
    /// Create a catalog with nothing registered.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
            materials: HashMap::new(),
        }
    }

    /// Register the template for a kind, returning the one it replaces.
    pub fn set_template(&mut self, kind: PieceKind, template: T) -> Option<T> {
        self.templates.insert(kind, template)
    }

    /// Register the material for a team, returning the one it replaces.
    pub fn set_material(&mut self, team: Team, material: M) -> Option<M> {
        self.materials.insert(team, material)
    }

    /// Builder form of [`set_template`][Self::set_template].
    pub fn with_template(mut self, kind: PieceKind, template: T) -> Self {
        self.set_template(kind, template);
        self
    }

    /// Builder form of [`set_material`][Self::set_material].
    pub fn with_material(mut self, team: Team, material: M) -> Self {
        self.set_material(team, material);
        self
    }

    /// Get the template for a kind.
    pub fn template(&self, kind: PieceKind) -> Result<&T, SetupError> {
        self.templates
            .get(&kind)
            .ok_or(SetupError::MissingTemplate(kind))
    }

    /// Get the material for a team.
    pub fn material(&self, team: Team) -> Result<&M, SetupError> {
        self.materials
            .get(&team)
            .ok_or(SetupError::MissingMaterial(team))
    }

    /// Check that every kind has a template and every team has a material.
    pub fn validate(&self) -> Result<(), SetupError> {
        for &kind in PieceKind::ALL {
            self.template(kind)?;
        }
        for &team in Team::ALL {
            self.material(team)?;
        }
        Ok(())
    }
}

impl<T, M> Default for AssetCatalog<T, M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Setup phase for a [`Board`]. Pieces may only be added to empty cells.
#[derive(Debug, Clone)]
pub struct BoardSetup {
    board: Board,
}

impl BoardSetup {
    /// Begin setup with an empty board of the given dimensions.
    pub fn new(dim: RectDimensions) -> Self {
        Self {
            board: Board::new(dim),
        }
    }

    /// Begin setup of a standard 8x8 board filled with the standard layout.
    pub fn standard() -> Self {
        let mut setup = Self::new(RectDimensions::default());
        // An empty 8x8 board always fits the layout.
        if let Err(err) = setup.standard_layout() {
            unreachable!("standard layout failed on an empty 8x8 board: {}", err);
        }
        setup
    }

    /// Get the [`RectDimensions`] of the board being set up.
    pub fn dimensions(&self) -> &RectDimensions {
        self.board.dimensions()
    }

    /// Get the board as set up so far.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Add a piece on an empty cell.
    pub fn add_piece(&mut self, kind: PieceKind, team: Team, cell: Cell) -> Result<(), PlaceError> {
        match self.board.occupant_at(cell) {
            Err(_) => Err(PlaceError::new(
                CannotPlaceReason::OutOfBounds,
                kind,
                team,
                cell,
            )),
            Ok(Some(_)) => Err(PlaceError::new(
                CannotPlaceReason::AlreadyOccupied,
                kind,
                team,
                cell,
            )),
            Ok(None) => {
                // Bounds and vacancy were checked above, so nothing is displaced.
                let _ = self.board.place(kind, team, cell);
                Ok(())
            }
        }
    }

    /// Fill the standard layout: white's back rank on `y == 0` with its pawns on
    /// `y == 1`, black's back rank on the last row with its pawns one row inward.
    ///
    /// Fails without placing anything if the board is not 8 cells wide and at least 4
    /// cells tall, or if any target cell is already occupied.
    pub fn standard_layout(&mut self) -> Result<(), SetupError> {
        let dim = *self.dimensions();
        if dim.width() != STANDARD_SIZE || dim.height() < 4 {
            return Err(SetupError::LayoutDoesNotFit {
                width: dim.width(),
                height: dim.height(),
            });
        }
        let last = dim.height() - 1;
        let rows = [
            (Team::White, 0, 1),
            (Team::Black, last, last - 1),
        ];
        for &(_, back, pawns) in rows.iter() {
            for x in 0..STANDARD_SIZE {
                for &y in [back, pawns].iter() {
                    if let Ok(Some(_)) = self.board.occupant_at(Cell::new(x, y)) {
                        return Err(SetupError::Placement(CannotPlaceReason::AlreadyOccupied));
                    }
                }
            }
        }
        for &(team, back, pawns) in rows.iter() {
            for (x, &kind) in BACK_RANK.iter().enumerate() {
                self.add_piece(kind, team, Cell::new(x, back))?;
            }
            for x in 0..STANDARD_SIZE {
                self.add_piece(PieceKind::Pawn, team, Cell::new(x, pawns))?;
            }
        }
        Ok(())
    }

    /// Finish setup and return the board.
    pub fn start(self) -> Board {
        info!(
            pieces = self.board.len(),
            width = self.board.dimensions().width(),
            height = self.board.dimensions().height(),
            "board setup complete"
        );
        self.board
    }
}

impl Default for BoardSetup {
    fn default() -> Self {
        Self::new(RectDimensions::default())
    }
}

/// Instantiate a visual for every piece on the board, assign its team's material and
/// move it to the centre of its cell.
///
/// The catalog is validated before anything is instantiated, so a missing template or
/// material leaves the presentation untouched.
pub fn spawn_visuals<P: Presentation>(
    board: &Board,
    catalog: &AssetCatalog<P::Template, P::Material>,
    layout: &BoardLayout,
    presentation: &mut P,
) -> Result<(), SetupError> {
    catalog.validate()?;
    let mut pieces: Vec<_> = board.iter_pieces().collect();
    pieces.sort_by_key(|piece| piece.id());
    for piece in &pieces {
        presentation.instantiate_piece_visual(
            piece.id(),
            piece.kind(),
            piece.team(),
            catalog.template(piece.kind())?,
        );
        presentation.assign_material(piece.id(), catalog.material(piece.team())?);
        presentation.set_piece_world_position(piece.id(), layout.center_of(piece.position()));
    }
    info!(count = pieces.len(), "spawned piece visuals");
    Ok(())
}
