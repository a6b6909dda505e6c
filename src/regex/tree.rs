use std::collections::BTreeSet;

/// Positions are 0-indexed, assigned in the order leaves are built; `u32` is
/// ample for any regex a human would write by hand.
pub(crate) type PositionId = u32;

#[derive(Debug, Clone)]
pub(crate) struct Attrs {
    pub nullable: bool,
    pub firstpos: BTreeSet<PositionId>,
    pub lastpos: BTreeSet<PositionId>,
}

/// The augmented regex syntax tree. Each variant carries its own [Attrs],
/// computed the moment the node is built (the operand-stack tree builder
/// visits children before parents, so this is naturally bottom-up — no
/// separate annotation pass is needed).
#[derive(Debug, Clone)]
pub(crate) enum Node {
    Literal(PositionId, char, Attrs),
    EndMarker(PositionId, Attrs),
    Concat(Box<Node>, Box<Node>, Attrs),
    Union(Box<Node>, Box<Node>, Attrs),
    Star(Box<Node>, Attrs),
    Plus(Box<Node>, Attrs),
    Option(Box<Node>, Attrs),
}

impl Node {
    pub fn attrs(&self) -> &Attrs {
        match self {
            Node::Literal(_, _, a)
            | Node::EndMarker(_, a)
            | Node::Concat(_, _, a)
            | Node::Union(_, _, a)
            | Node::Star(_, a)
            | Node::Plus(_, a)
            | Node::Option(_, a) => a,
        }
    }

    pub fn literal(pos: PositionId, ch: char) -> Self {
        let mut firstpos = BTreeSet::new();
        firstpos.insert(pos);
        Node::Literal(
            pos,
            ch,
            Attrs {
                nullable: false,
                lastpos: firstpos.clone(),
                firstpos,
            },
        )
    }

    pub fn end_marker(pos: PositionId) -> Self {
        let mut firstpos = BTreeSet::new();
        firstpos.insert(pos);
        Node::EndMarker(
            pos,
            Attrs {
                nullable: false,
                lastpos: firstpos.clone(),
                firstpos,
            },
        )
    }

    pub fn concat(l: Node, r: Node) -> Self {
        let nullable = l.attrs().nullable && r.attrs().nullable;
        let firstpos = if l.attrs().nullable {
            l.attrs().firstpos.union(&r.attrs().firstpos).copied().collect()
        } else {
            l.attrs().firstpos.clone()
        };
        let lastpos = if r.attrs().nullable {
            r.attrs().lastpos.union(&l.attrs().lastpos).copied().collect()
        } else {
            r.attrs().lastpos.clone()
        };
        Node::Concat(
            Box::new(l),
            Box::new(r),
            Attrs { nullable, firstpos, lastpos },
        )
    }

    pub fn union(l: Node, r: Node) -> Self {
        let nullable = l.attrs().nullable || r.attrs().nullable;
        let firstpos = l.attrs().firstpos.union(&r.attrs().firstpos).copied().collect();
        let lastpos = l.attrs().lastpos.union(&r.attrs().lastpos).copied().collect();
        Node::Union(
            Box::new(l),
            Box::new(r),
            Attrs { nullable, firstpos, lastpos },
        )
    }

    pub fn star(c: Node) -> Self {
        let attrs = Attrs {
            nullable: true,
            firstpos: c.attrs().firstpos.clone(),
            lastpos: c.attrs().lastpos.clone(),
        };
        Node::Star(Box::new(c), attrs)
    }

    pub fn plus(c: Node) -> Self {
        let attrs = Attrs {
            nullable: c.attrs().nullable,
            firstpos: c.attrs().firstpos.clone(),
            lastpos: c.attrs().lastpos.clone(),
        };
        Node::Plus(Box::new(c), attrs)
    }

    pub fn option(c: Node) -> Self {
        let attrs = Attrs {
            nullable: true,
            firstpos: c.attrs().firstpos.clone(),
            lastpos: c.attrs().lastpos.clone(),
        };
        Node::Option(Box::new(c), attrs)
    }

    /// Find the position id of the tree's single `EndMarker` leaf.
    pub fn end_marker_pos(&self) -> PositionId {
        self.try_end_marker_pos()
            .expect("augmented tree always contains exactly one EndMarker leaf")
    }

    fn try_end_marker_pos(&self) -> Option<PositionId> {
        match self {
            Node::EndMarker(pos, _) => Some(*pos),
            Node::Literal(..) => None,
            Node::Concat(l, r, _) | Node::Union(l, r, _) => {
                l.try_end_marker_pos().or_else(|| r.try_end_marker_pos())
            }
            Node::Star(c, _) | Node::Plus(c, _) | Node::Option(c, _) => c.try_end_marker_pos(),
        }
    }

    /// Populate the followpos table.
    pub fn compute_followpos(&self, table: &mut std::collections::HashMap<PositionId, BTreeSet<PositionId>>) {
        match self {
            Node::Concat(l, r, _) => {
                for &p in &l.attrs().lastpos {
                    table.entry(p).or_default().extend(r.attrs().firstpos.iter().copied());
                }
                l.compute_followpos(table);
                r.compute_followpos(table);
            }
            Node::Star(c, _) | Node::Plus(c, _) => {
                for &p in &c.attrs().lastpos {
                    table.entry(p).or_default().extend(c.attrs().firstpos.iter().copied());
                }
                c.compute_followpos(table);
            }
            Node::Union(l, r, _) => {
                l.compute_followpos(table);
                r.compute_followpos(table);
            }
            Node::Option(c, _) => c.compute_followpos(table),
            Node::Literal(..) | Node::EndMarker(..) => {}
        }
    }

    /// Populate the position→character map used to drive subset construction
    /// (`EndMarker` is deliberately excluded: it names no alphabet symbol).
    pub fn collect_symbols(&self, symbols: &mut std::collections::HashMap<PositionId, char>) {
        match self {
            Node::Literal(pos, ch, _) => {
                symbols.insert(*pos, *ch);
            }
            Node::EndMarker(..) => {}
            Node::Concat(l, r, _) | Node::Union(l, r, _) => {
                l.collect_symbols(symbols);
                r.collect_symbols(symbols);
            }
            Node::Star(c, _) | Node::Plus(c, _) | Node::Option(c, _) => c.collect_symbols(symbols),
        }
    }
}

impl ptree::TreeItem for Node {
    type Child = Node;

    fn write_self<W: std::io::Write>(&self, f: &mut W, style: &ptree::Style) -> std::io::Result<()> {
        let label = match self {
            Node::Literal(pos, ch, _) => format!("Literal({:?}) #{}", ch, pos),
            Node::EndMarker(pos, _) => format!("EndMarker #{}", pos),
            Node::Concat(..) => "Concat".to_string(),
            Node::Union(..) => "Union".to_string(),
            Node::Star(..) => "Star".to_string(),
            Node::Plus(..) => "Plus".to_string(),
            Node::Option(..) => "Option".to_string(),
        };
        write!(f, "{}", style.paint(label))
    }

    fn children(&self) -> std::borrow::Cow<[Self::Child]> {
        match self {
            Node::Literal(..) | Node::EndMarker(..) => std::borrow::Cow::Borrowed(&[]),
            Node::Concat(l, r, _) | Node::Union(l, r, _) => {
                std::borrow::Cow::Owned(vec![(**l).clone(), (**r).clone()])
            }
            Node::Star(c, _) | Node::Plus(c, _) | Node::Option(c, _) => {
                std::borrow::Cow::Owned(vec![(**c).clone()])
            }
        }
    }
}
