//! JVM type descriptors: parsing and validation.
//!
//! Descriptors are the compact type signatures the class-file format attaches to
//! members: `I` for `int`, `Ljava/lang/String;` for a class reference,
//! `(IJ)V` for a method taking `int, long` and returning `void`. Class references
//! inside a descriptor are spelled in one namespace's naming scheme, so a
//! descriptor string is only meaningful relative to the namespace it was written
//! in. Parsing here is purely structural and does not translate names.
//!
//! The decoder validates every member descriptor through this module; consumers
//! can use the parsed shapes to build argument lists for reflective calls.
//!
//! # Reference
//! - JVMS §4.3 (field and method descriptors)

use crate::Result;

/// Maximum number of array dimensions permitted by the class-file format.
const MAX_ARRAY_DIMENSIONS: usize = 255;

/// A parsed field or component type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// `Z`
    Boolean,
    /// `B`
    Byte,
    /// `C`
    Char,
    /// `S`
    Short,
    /// `I`
    Int,
    /// `J`
    Long,
    /// `F`
    Float,
    /// `D`
    Double,
    /// `V` - valid only as a method return type.
    Void,
    /// `L<name>;` - a class reference. The name is in internal (slash-separated)
    /// form, spelled in whichever namespace the descriptor was written in.
    Object(String),
    /// `[...` - an array of the element type.
    Array {
        /// Number of dimensions, 1 to 255.
        dimensions: usize,
        /// The non-array element type.
        element: Box<TypeDescriptor>,
    },
}

/// A parsed method descriptor: parameter types and return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Parameter types in declaration order. Never contains [`TypeDescriptor::Void`].
    pub parameters: Vec<TypeDescriptor>,
    /// The return type; [`TypeDescriptor::Void`] for `V`.
    pub return_type: TypeDescriptor,
}

/// Parse a field descriptor such as `I` or `[Ljava/lang/String;`.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the string is not exactly one valid
/// non-void field descriptor.
///
/// # Examples
///
/// ```rust
/// use mapscope::mapping::descriptor::{parse_field_descriptor, TypeDescriptor};
///
/// let ty = parse_field_descriptor("[[I")?;
/// assert_eq!(ty, TypeDescriptor::Array { dimensions: 2, element: Box::new(TypeDescriptor::Int) });
/// # Ok::<(), mapscope::Error>(())
/// ```
pub fn parse_field_descriptor(descriptor: &str) -> Result<TypeDescriptor> {
    let mut parser = DescriptorParser::new(descriptor);
    let ty = parser.parse_type(false)?;
    parser.expect_end()?;
    Ok(ty)
}

/// Parse a method descriptor such as `(ILjava/lang/String;)V`.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the string is not exactly one valid
/// method descriptor.
pub fn parse_method_descriptor(descriptor: &str) -> Result<MethodDescriptor> {
    let mut parser = DescriptorParser::new(descriptor);

    if parser.next() != Some(b'(') {
        return Err(malformed_error!("method descriptor '{}' does not start with '('", descriptor));
    }

    let mut parameters = Vec::new();
    loop {
        match parser.peek() {
            Some(b')') => {
                parser.next();
                break;
            }
            Some(_) => parameters.push(parser.parse_type(false)?),
            None => {
                return Err(malformed_error!("method descriptor '{}' has an unterminated parameter list", descriptor))
            }
        }
    }

    let return_type = parser.parse_type(true)?;
    parser.expect_end()?;

    Ok(MethodDescriptor { parameters, return_type })
}

/// Cursor over a descriptor string. Descriptors are ASCII, so the parser walks
/// bytes; class names between `L` and `;` are carried through verbatim.
struct DescriptorParser<'a> {
    data: &'a [u8],
    source: &'a str,
    position: usize,
}

impl<'a> DescriptorParser<'a> {
    fn new(descriptor: &'a str) -> Self {
        DescriptorParser {
            data: descriptor.as_bytes(),
            source: descriptor,
            position: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.position).copied()
    }

    fn next(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Some(byte)
    }

    fn expect_end(&self) -> Result<()> {
        if self.position == self.data.len() {
            Ok(())
        } else {
            Err(malformed_error!(
                "descriptor '{}' has trailing characters at offset {}",
                self.source,
                self.position
            ))
        }
    }

    fn parse_type(&mut self, allow_void: bool) -> Result<TypeDescriptor> {
        match self.next() {
            Some(b'Z') => Ok(TypeDescriptor::Boolean),
            Some(b'B') => Ok(TypeDescriptor::Byte),
            Some(b'C') => Ok(TypeDescriptor::Char),
            Some(b'S') => Ok(TypeDescriptor::Short),
            Some(b'I') => Ok(TypeDescriptor::Int),
            Some(b'J') => Ok(TypeDescriptor::Long),
            Some(b'F') => Ok(TypeDescriptor::Float),
            Some(b'D') => Ok(TypeDescriptor::Double),
            Some(b'V') if allow_void => Ok(TypeDescriptor::Void),
            Some(b'L') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(other) => Err(malformed_error!(
                "descriptor '{}' has an invalid type tag '{}' at offset {}",
                self.source,
                char::from(other),
                self.position - 1
            )),
            None => Err(malformed_error!("descriptor '{}' ends where a type was expected", self.source)),
        }
    }

    fn parse_object(&mut self) -> Result<TypeDescriptor> {
        let start = self.position;
        loop {
            match self.next() {
                Some(b';') => break,
                Some(_) => {}
                None => {
                    return Err(malformed_error!("descriptor '{}' has an unterminated class reference", self.source))
                }
            }
        }

        let name = &self.source[start..self.position - 1];
        if name.is_empty() {
            return Err(malformed_error!("descriptor '{}' has an empty class reference", self.source));
        }
        Ok(TypeDescriptor::Object(name.to_string()))
    }

    fn parse_array(&mut self) -> Result<TypeDescriptor> {
        let mut dimensions = 1;
        while self.peek() == Some(b'[') {
            self.next();
            dimensions += 1;
            if dimensions > MAX_ARRAY_DIMENSIONS {
                return Err(malformed_error!(
                    "descriptor '{}' exceeds {} array dimensions",
                    self.source,
                    MAX_ARRAY_DIMENSIONS
                ));
            }
        }

        let element = self.parse_type(false)?;
        Ok(TypeDescriptor::Array {
            dimensions,
            element: Box::new(element),
        })
    }
}
