//! Wavefront OBJ subset parser.
//!
//! Only `v`, `vt`, `vn` and `f` are understood; every other directive is
//! skipped to the end of its line. Faces keep their 1-based indices so that
//! range checks happen once, when the mesh is built.

use std::num::NonZeroU32;

use super::error::{MeshError, SyntaxError};
use super::scanner::Scanner;
use crate::math::{Vec2f, Vec3f};

/// A 1-based index into one of the attribute arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjIndex(NonZeroU32);

impl ObjIndex {
    /// Accepts only positive values that fit a `u32`.
    pub fn new(value: i64) -> Option<Self> {
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Looks the index up in `items`, or `None` when it is out of range.
    pub fn resolve<T: Copy>(self, items: &[T]) -> Option<T> {
        items.get(self.0.get() as usize - 1).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjCorner {
    pub position: ObjIndex,
    pub tex_coord: Option<ObjIndex>,
    pub normal: Option<ObjIndex>,
}

/// One triangle, either written as such or split from a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjFace {
    pub corners: [ObjCorner; 3],
    /// Source line of the `f` directive.
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ObjData {
    pub positions: Vec<Vec3f>,
    pub normals: Vec<Vec3f>,
    pub tex_coords: Vec<Vec2f>,
    pub faces: Vec<ObjFace>,
}

impl ObjData {
    /// Drops the normal array and every corner's reference into it.
    pub fn discard_normals(&mut self) {
        self.normals.clear();
        for face in &mut self.faces {
            for corner in &mut face.corners {
                corner.normal = None;
            }
        }
    }

    pub fn corner_count(&self) -> usize {
        self.faces.len() * 3
    }

    /// True when every corner of every face references a normal.
    pub fn has_normals(&self) -> bool {
        self.all_corners(|corner| corner.normal.is_some())
    }

    /// True when every corner of every face references a texture coordinate.
    pub fn has_tex_coords(&self) -> bool {
        self.all_corners(|corner| corner.tex_coord.is_some())
    }

    fn all_corners(&self, predicate: impl Fn(&ObjCorner) -> bool) -> bool {
        !self.faces.is_empty()
            && self
                .faces
                .iter()
                .all(|face| face.corners.iter().all(&predicate))
    }
}

pub fn parse_obj(bytes: &[u8]) -> Result<ObjData, MeshError> {
    let mut parser = ObjParser {
        scanner: Scanner::new(bytes),
        data: ObjData::default(),
        corners: Vec::with_capacity(4),
    };
    parser.run()?;

    let data = parser.data;
    log::debug!(
        "Parsed OBJ: {} positions, {} normals, {} texture coordinates, {} triangles",
        data.positions.len(),
        data.normals.len(),
        data.tex_coords.len(),
        data.faces.len()
    );
    Ok(data)
}

struct ObjParser<'a> {
    scanner: Scanner<'a>,
    data: ObjData,
    // Reused across faces.
    corners: Vec<ObjCorner>,
}

impl ObjParser<'_> {
    fn run(&mut self) -> Result<(), MeshError> {
        loop {
            self.scanner.skip_whitespace_and_comments();
            if self.scanner.at_end() {
                return Ok(());
            }

            if self.scanner.match_word("vt") {
                let [u, v] = self.parse_floats("vt")?;
                self.data.tex_coords.push(Vec2f::new(u, v));
            } else if self.scanner.match_word("vn") {
                let [x, y, z] = self.parse_floats("vn")?;
                self.data.normals.push(Vec3f::new(x, y, z));
            } else if self.scanner.match_word("v") {
                let [x, y, z] = self.parse_floats("v")?;
                self.data.positions.push(Vec3f::new(x, y, z));
            } else if self.scanner.match_word("f") {
                self.parse_face()?;
            }

            self.scanner.skip_line();
        }
    }

    fn syntax_error(&self, kind: SyntaxError) -> MeshError {
        let (line, column) = self.scanner.location();
        MeshError::Syntax { line, column, kind }
    }

    /// Reads `N` floats; anything after them on the line is left for the caller to skip.
    fn parse_floats<const N: usize>(&mut self, directive: &'static str) -> Result<[f32; N], MeshError> {
        let mut values = [0.0; N];
        for (component, value) in values.iter_mut().enumerate() {
            self.scanner.skip_inline_whitespace();
            *value = self.scanner.parse_float().ok_or_else(|| {
                self.syntax_error(SyntaxError::ExpectedFloat {
                    directive,
                    component: component + 1,
                })
            })?;
        }
        Ok(values)
    }

    fn parse_face(&mut self) -> Result<(), MeshError> {
        let (line, column) = self.scanner.location();
        self.corners.clear();

        loop {
            self.scanner.skip_inline_whitespace();
            if self.scanner.at_line_end() {
                break;
            }
            let corner = self.parse_corner(self.corners.len() + 1)?;
            self.corners.push(corner);
        }

        let c = &self.corners;
        match c.len() {
            3 => self.data.faces.push(ObjFace {
                corners: [c[0], c[1], c[2]],
                line,
            }),
            4 => {
                let first = ObjFace {
                    corners: [c[0], c[1], c[2]],
                    line,
                };
                let second = ObjFace {
                    corners: [c[0], c[2], c[3]],
                    line,
                };
                self.data.faces.extend([first, second]);
            }
            count => {
                return Err(MeshError::Syntax {
                    line,
                    column,
                    kind: SyntaxError::CornerCount { count },
                })
            }
        }
        Ok(())
    }

    /// `p`, `p/t`, `p//n` or `p/t/n`.
    fn parse_corner(&mut self, corner: usize) -> Result<ObjCorner, MeshError> {
        let position = self.parse_index(corner)?;
        let mut tex_coord = None;
        let mut normal = None;

        if self.scanner.match_literal("/") {
            if self.scanner.match_literal("/") {
                normal = Some(self.parse_index(corner)?);
            } else {
                tex_coord = Some(self.parse_index(corner)?);
                if self.scanner.match_literal("/") {
                    normal = Some(self.parse_index(corner)?);
                }
            }
        }

        Ok(ObjCorner {
            position,
            tex_coord,
            normal,
        })
    }

    fn parse_index(&mut self, corner: usize) -> Result<ObjIndex, MeshError> {
        let (line, column) = self.scanner.location();
        let value = self
            .scanner
            .parse_int()
            .ok_or_else(|| self.syntax_error(SyntaxError::ExpectedIndex { corner }))?;

        ObjIndex::new(value).ok_or(MeshError::Syntax {
            line,
            column,
            kind: SyntaxError::InvalidIndex { value },
        })
    }
}
