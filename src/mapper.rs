//! Marshalling of atoms into their JSON field set, and parsing of the value
//! objects clients send in request bodies.

use serde::{Deserialize, Serialize};

use crate::construct::{Atom, AtomType, AttentionValue, Handle, TruthValue};
use crate::error::{AtomSpaceError, Result};

// ------------- Responses -------------
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TruthValueDetails {
    pub strength: f64,
    pub count: f64,
    pub confidence: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TruthValueFields {
    #[serde(rename = "type")]
    pub tv_type: &'static str,
    pub details: TruthValueDetails,
}

impl From<TruthValue> for TruthValueFields {
    fn from(tv: TruthValue) -> Self {
        Self {
            tv_type: "simple",
            details: TruthValueDetails {
                strength: tv.strength(),
                count: tv.count(),
                confidence: tv.confidence(),
            },
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AttentionValueFields {
    pub sti: i16,
    pub lti: i16,
    pub vlti: bool,
}

impl From<AttentionValue> for AttentionValueFields {
    fn from(av: AttentionValue) -> Self {
        Self {
            sti: av.sti(),
            lti: av.lti(),
            vlti: av.vlti(),
        }
    }
}

/// The fixed field set an atom is rendered with.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AtomFields {
    pub handle: Handle,
    pub name: String,
    #[serde(rename = "type")]
    pub atom_type: AtomType,
    pub outgoing: Vec<Handle>,
    pub incoming: Vec<Handle>,
    pub truthvalue: TruthValueFields,
    pub attentionvalue: AttentionValueFields,
}

pub fn marshal(atom: &Atom) -> AtomFields {
    AtomFields {
        handle: atom.handle(),
        name: atom.name().to_owned(),
        atom_type: atom.atom_type(),
        outgoing: atom.outgoing().to_vec(),
        incoming: atom.incoming().to_vec(),
        truthvalue: atom.tv().into(),
        attentionvalue: atom.av().into(),
    }
}

// ------------- Requests -------------
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SimpleTruthValueDetails {
    pub strength: f64,
    pub count: f64,
}

/// A truth value as sent by clients. Only simple truth values are known.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TruthValueRequest {
    Simple { details: SimpleTruthValueDetails },
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AttentionValueRequest {
    #[serde(default)]
    pub sti: Option<i16>,
    #[serde(default)]
    pub lti: Option<i16>,
    #[serde(default)]
    pub vlti: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UpdateAtomRequest {
    #[serde(default)]
    pub truthvalue: Option<TruthValueRequest>,
    #[serde(default)]
    pub attentionvalue: Option<AttentionValueRequest>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CreateAtomRequest {
    #[serde(rename = "type")]
    pub atom_type: AtomType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub outgoing: Vec<Handle>,
    #[serde(default)]
    pub truthvalue: Option<TruthValueRequest>,
    #[serde(default)]
    pub attentionvalue: Option<AttentionValueRequest>,
}

pub fn parse_truth_value(request: &TruthValueRequest) -> Result<TruthValue> {
    match request {
        TruthValueRequest::Simple { details } => {
            let SimpleTruthValueDetails { strength, count } = *details;
            if !strength.is_finite() || !(0.0..=1.0).contains(&strength) {
                return Err(AtomSpaceError::bad_request(
                    "Invalid request: truthvalue strength must be between 0 and 1",
                ));
            }
            if !count.is_finite() || count < 0.0 {
                return Err(AtomSpaceError::bad_request(
                    "Invalid request: truthvalue count must be a non-negative number",
                ));
            }
            Ok(TruthValue::new(strength, count))
        }
    }
}

pub fn parse_attention_value(
    request: &AttentionValueRequest,
) -> (Option<i16>, Option<i16>, Option<bool>) {
    (request.sti, request.lti, request.vlti)
}
