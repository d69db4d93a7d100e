// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Well-known vocabulary namespaces and terms

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const DC: &str = "http://purl.org/dc/elements/1.1/";
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
pub const SCHEMA: &str = "http://schema.org/";

pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
pub const DC_TITLE: &str = "http://purl.org/dc/elements/1.1/title";
pub const DCTERMS_TITLE: &str = "http://purl.org/dc/terms/title";
pub const SCHEMA_NAME: &str = "http://schema.org/name";
pub const SKOS_ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";

/// Namespaces whose terms are vocabulary infrastructure
pub const SYSTEM_NAMESPACES: [&str; 4] = [RDF, RDFS, OWL, XSD];

/// Core terms that stay visible even though they live in a system namespace
pub const CORE_RESOURCES: [&str; 7] = [
    "http://www.w3.org/2000/01/rdf-schema#Resource",
    "http://www.w3.org/2000/01/rdf-schema#Class",
    "http://www.w3.org/2000/01/rdf-schema#Literal",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property",
    "http://www.w3.org/2002/07/owl#Class",
    "http://www.w3.org/2002/07/owl#ObjectProperty",
    "http://www.w3.org/2002/07/owl#DatatypeProperty",
];

/// Substrings marking a URI as domain content regardless of namespace
pub const DOMAIN_MARKERS: [&str; 7] = [
    "/ontology",
    "/resource",
    "/class",
    "/product",
    "/schema.org",
    "/Property",
    "#Property",
];

/// Label-like predicates in rank order
pub const LABEL_PREDICATES: [&str; 6] = [
    RDFS_LABEL,
    SKOS_PREF_LABEL,
    DC_TITLE,
    DCTERMS_TITLE,
    SCHEMA_NAME,
    SKOS_ALT_LABEL,
];

/// Preferred label language, highest priority first
pub const PRIMARY_LANGUAGE: &str = "sv";
pub const SECONDARY_LANGUAGE: &str = "en";
