//! Turtle and N-Triples via rio

use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use oxrdf::vocab::xsd;
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleFormatter, TurtleParser};
use std::io::Cursor;

pub(super) fn parse_turtle(input: &str) -> ParseResult<Vec<Triple>> {
    let mut parser = TurtleParser::new(Cursor::new(input), None);
    collect(&mut parser)
}

pub(super) fn parse_ntriples(input: &str) -> ParseResult<Vec<Triple>> {
    let mut parser = NTriplesParser::new(Cursor::new(input));
    collect(&mut parser)
}

fn collect<P>(parser: &mut P) -> ParseResult<Vec<Triple>>
where
    P: TriplesParser,
    ParseError: From<P::Error>,
{
    let mut triples = Vec::new();
    parser.parse_all(&mut |t| -> ParseResult<()> {
        triples.push(Triple::new(
            convert_subject(t.subject)?,
            convert_predicate(t.predicate)?,
            convert_object(t.object)?,
        ));
        Ok(())
    })?;
    Ok(triples)
}

pub(super) fn serialize_turtle(triples: &[Triple]) -> SerializeResult<String> {
    let mut formatter = TurtleFormatter::new(Vec::new());
    for triple in triples {
        formatter.format(&to_rio(triple))?;
    }
    into_string(formatter.finish()?)
}

pub(super) fn serialize_ntriples(triples: &[Triple]) -> SerializeResult<String> {
    let mut formatter = NTriplesFormatter::new(Vec::new());
    for triple in triples {
        formatter.format(&to_rio(triple))?;
    }
    into_string(formatter.finish()?)
}

fn into_string(output: Vec<u8>) -> SerializeResult<String> {
    String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
}

fn to_rio(triple: &Triple) -> model::Triple<'_> {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };

    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => model::Term::Literal(rio_literal(l)),
    };

    model::Triple {
        subject,
        predicate: model::NamedNode { iri: triple.predicate.as_str() },
        object,
    }
}

fn rio_literal(literal: &Literal) -> model::Literal<'_> {
    if let Some(language) = literal.language() {
        model::Literal::LanguageTaggedString {
            value: literal.value(),
            language,
        }
    } else if literal.datatype_iri() == xsd::STRING.as_str() {
        model::Literal::Simple { value: literal.value() }
    } else {
        model::Literal::Typed {
            value: literal.value(),
            datatype: model::NamedNode { iri: literal.datatype_iri() },
        }
    }
}

fn invalid(e: impl ToString) -> ParseError {
    ParseError::Parse(e.to_string())
}

fn convert_subject(s: model::Subject<'_>) -> ParseResult<RdfSubject> {
    match s {
        model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(NamedNode::new(n.iri).map_err(invalid)?)),
        model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(BlankNode::from_id(b.id).map_err(invalid)?)),
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: model::NamedNode<'_>) -> ParseResult<RdfPredicate> {
    RdfPredicate::new(p.iri).map_err(invalid)
}

fn convert_object(o: model::Term<'_>) -> ParseResult<RdfObject> {
    match o {
        model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(NamedNode::new(n.iri).map_err(invalid)?)),
        model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(BlankNode::from_id(b.id).map_err(invalid)?)),
        model::Term::Literal(model::Literal::Simple { value }) => {
            Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
        }
        model::Term::Literal(model::Literal::LanguageTaggedString { value, language }) => Ok(RdfObject::Literal(
            Literal::new_language_tagged_literal(value, language).map_err(invalid)?,
        )),
        model::Term::Literal(model::Literal::Typed { value, datatype }) => {
            let datatype = NamedNode::new(datatype.iri).map_err(invalid)?;
            Ok(RdfObject::Literal(Literal::new_typed_literal(value, datatype)))
        }
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}
