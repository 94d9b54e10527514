//! Arena-backed menu tree

use barograph_display::LINE_LENGTH;
use barograph_hal::{DelayNs, RegisterIo};
use heapless::{String, Vec};

use crate::action::{Action, Target, Transition};
use crate::error::PanelError;
use crate::menu::window::visible_window;
use crate::panel::{Line, Lines, Panel};

/// Maximum nodes in one tree
pub const MAX_NODES: usize = 48;
/// Maximum children of one node
pub const MAX_CHILDREN: usize = 24;
/// Longest name; one column is kept for the selection marker
pub const MAX_NAME_LEN: usize = LINE_LENGTH - 1;

/// Marker in front of the selected row
const MARKER: char = '-';

/// Menu construction and lookup errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuError {
    /// Arena has no room for another node
    TreeFull,
    /// Parent has no room for another child
    TooManyChildren,
    /// Name does not fit next to the marker
    NameTooLong,
    /// Id does not belong to this tree
    UnknownNode,
}

/// Index of a node in its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeId(u8);

impl NodeId {
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// Outcome of selecting a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Selection {
    /// Keep the current node
    Stay,
    /// Make this node current
    Enter(NodeId),
    /// Shut the panel down
    Quit,
}

/// A named entry with optional children and an optional action
pub struct MenuNode<C> {
    name: String<MAX_NAME_LEN>,
    /// Back-reference only; the arena owns every node
    parent: Option<NodeId>,
    children: Vec<NodeId, MAX_CHILDREN>,
    selected: usize,
    action: Option<Action<C>>,
}

impl<C> MenuNode<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Index into `children` of the selected child
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn action(&self) -> Option<&Action<C>> {
        self.action.as_ref()
    }
}

/// The menu, generic over the context its actions operate on
pub struct MenuTree<C> {
    nodes: Vec<MenuNode<C>, MAX_NODES>,
}

impl<C> MenuTree<C> {
    /// Create a tree holding only the root
    pub fn new(root_name: &str) -> Result<Self, MenuError> {
        let mut tree = Self { nodes: Vec::new() };
        tree.push(root_name, None, None)?;
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&MenuNode<C>, MenuError> {
        self.nodes.get(id.index()).ok_or(MenuError::UnknownNode)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut MenuNode<C>, MenuError> {
        self.nodes.get_mut(id.index()).ok_or(MenuError::UnknownNode)
    }

    fn push(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        action: Option<Action<C>>,
    ) -> Result<NodeId, MenuError> {
        let name = String::try_from(name).map_err(|_| MenuError::NameTooLong)?;
        let id = u8::try_from(self.nodes.len()).map_err(|_| MenuError::TreeFull)?;
        self.nodes
            .push(MenuNode {
                name,
                parent,
                children: Vec::new(),
                selected: 0,
                action,
            })
            .map_err(|_| MenuError::TreeFull)?;
        Ok(NodeId(id))
    }

    /// Append a child to `parent`
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: &str,
        action: Option<Action<C>>,
    ) -> Result<NodeId, MenuError> {
        let siblings = self.node(parent)?.children.len();
        if siblings >= MAX_CHILDREN {
            return Err(MenuError::TooManyChildren);
        }
        let id = self.push(name, Some(parent), action)?;
        self.node_mut(parent)?
            .children
            .push(id)
            .map_err(|_| MenuError::TooManyChildren)?;
        Ok(id)
    }

    /// Append a child that opens itself as a submenu when selected
    pub fn add_submenu(&mut self, parent: NodeId, name: &str) -> Result<NodeId, MenuError> {
        self.add_child(parent, name, Some(Action::navigate(Target::This)))
    }

    /// Bind or replace the action of a node
    pub fn set_action(&mut self, id: NodeId, action: Action<C>) -> Result<(), MenuError> {
        self.node_mut(id)?.action = Some(action);
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    /// Id of the selected child of `id`
    pub fn selected_child(&self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(id.index())?;
        node.children.get(node.selected).copied()
    }

    /// Move the selection down, wrapping to the first child
    pub fn down(&mut self, id: NodeId) -> Result<(), MenuError> {
        let node = self.node_mut(id)?;
        let count = node.children.len();
        if count > 0 {
            node.selected = (node.selected + 1) % count;
        }
        Ok(())
    }

    /// Move the selection up, wrapping to the last child
    pub fn up(&mut self, id: NodeId) -> Result<(), MenuError> {
        let node = self.node_mut(id)?;
        let count = node.children.len();
        if count > 0 {
            node.selected = (node.selected + count - 1) % count;
        }
        Ok(())
    }

    /// Screen lines for `id`: a window of child names, the selected one marked
    pub fn lines(&self, id: NodeId) -> Result<Lines, MenuError> {
        let node = self.node(id)?;
        let mut lines = Lines::new();
        for i in visible_window(node.children.len(), node.selected) {
            let child = self.node(node.children[i])?;
            let mut line = Line::new();
            let _ = line.push(if i == node.selected { MARKER } else { ' ' });
            let _ = line.push_str(&child.name);
            let _ = lines.push(line);
        }
        Ok(lines)
    }

    /// Render `id` on the screen; a node without children draws nothing
    pub fn draw<R: RegisterIo, D: DelayNs>(
        &self,
        id: NodeId,
        panel: &mut Panel<R, D>,
    ) -> Result<(), PanelError> {
        let lines = self.lines(id)?;
        if lines.is_empty() {
            return Ok(());
        }
        panel.clear();
        for line in &lines {
            panel.write_line(line)?;
        }
        Ok(())
    }

    /// Run the action bound to `id`
    ///
    /// The action takes over the panel until it finishes; its transition is
    /// resolved relative to `id`. A node without an action is inert.
    pub fn select<R: RegisterIo, D: DelayNs>(
        &mut self,
        id: NodeId,
        panel: &mut Panel<R, D>,
        ctx: &mut C,
    ) -> Result<Selection, PanelError> {
        let Some(mut action) = self.node_mut(id)?.action.take() else {
            return Ok(Selection::Stay);
        };
        let result = action.invoke(panel, ctx);
        self.node_mut(id)?.action = Some(action);

        Ok(self.resolve(id, result?))
    }

    /// Select the selected child of `current`
    pub fn activate<R: RegisterIo, D: DelayNs>(
        &mut self,
        current: NodeId,
        panel: &mut Panel<R, D>,
        ctx: &mut C,
    ) -> Result<Selection, PanelError> {
        match self.selected_child(current) {
            Some(child) => self.select(child, panel, ctx),
            None => Ok(Selection::Stay),
        }
    }

    fn resolve(&self, id: NodeId, transition: Transition) -> Selection {
        let target = match transition {
            Transition::Stay => return Selection::Stay,
            Transition::Goto(target) => target,
        };
        let node = match target {
            Target::Quit => return Selection::Quit,
            Target::This => Some(id),
            Target::Parent => self.parent(id),
            Target::Grandparent => self.parent(id).and_then(|p| self.parent(p)),
            Target::Node(n) => self.nodes.get(n.index()).map(|_| n),
        };
        node.map_or(Selection::Stay, Selection::Enter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Notice;
    use crate::config::PanelConfig;
    use barograph_hal::mock::{MockDelay, MockRegisters};

    const TEXT: u16 = 0x40;
    const SELECT: u16 = 0x80;

    #[derive(Default)]
    struct Ctx {
        guarded: usize,
    }

    fn panel() -> Panel<MockRegisters, MockDelay> {
        Panel::new(MockRegisters::new(), MockDelay::new(), &PanelConfig::default()).unwrap()
    }

    /// root -> a, b, c, d, e
    fn five() -> MenuTree<Ctx> {
        let mut tree = MenuTree::new("root").unwrap();
        for name in ["a", "b", "c", "d", "e"] {
            tree.add_child(tree.root(), name, None).unwrap();
        }
        tree
    }

    #[test]
    fn test_windowed_lines() {
        let mut tree = five();
        let root = tree.root();
        assert_eq!(tree.lines(root).unwrap(), ["-a", " b", " c"]);

        tree.up(root).unwrap();
        assert_eq!(tree.lines(root).unwrap(), [" c", " d", "-e"]);

        tree.up(root).unwrap();
        tree.up(root).unwrap();
        assert_eq!(tree.node(root).unwrap().selected(), 2);
        assert_eq!(tree.lines(root).unwrap(), [" b", "-c", " d"]);
    }

    #[test]
    fn test_down_wraps() {
        let mut tree = five();
        let root = tree.root();
        for _ in 0..5 {
            tree.down(root).unwrap();
        }
        assert_eq!(tree.node(root).unwrap().selected(), 0);
    }

    #[test]
    fn test_leaf_moves_are_noops() {
        let mut tree = five();
        let leaf = tree.selected_child(tree.root()).unwrap();
        tree.down(leaf).unwrap();
        tree.up(leaf).unwrap();
        assert_eq!(tree.node(leaf).unwrap().selected(), 0);
        assert!(tree.lines(leaf).unwrap().is_empty());
    }

    #[test]
    fn test_draw_skips_leaves() {
        let mut panel = panel();
        let tree = five();
        let leaf = tree.selected_child(tree.root()).unwrap();

        tree.draw(leaf, &mut panel).unwrap();
        assert_eq!(panel.io().clear_count(TEXT), 1);

        tree.draw(tree.root(), &mut panel).unwrap();
        assert_eq!(panel.io().screen(TEXT), ["-a", " b", " c"]);
    }

    #[test]
    fn test_construction_limits() {
        let mut tree: MenuTree<Ctx> = MenuTree::new("root").unwrap();
        let root = tree.root();
        assert_eq!(
            tree.add_child(root, "012345678901234567890", None),
            Err(MenuError::NameTooLong)
        );
        assert!(tree.add_child(root, "01234567890123456789", None).is_ok());

        for _ in 1..MAX_CHILDREN {
            tree.add_child(root, "x", None).unwrap();
        }
        assert_eq!(
            tree.add_child(root, "y", None),
            Err(MenuError::TooManyChildren)
        );

        // 1 root + MAX_CHILDREN children so far
        let sub = tree.selected_child(root).unwrap();
        while tree.len() < MAX_NODES {
            tree.add_child(sub, "z", None).unwrap();
        }
        assert_eq!(tree.add_child(sub, "z", None), Err(MenuError::TreeFull));
        assert_eq!(tree.node(NodeId(200)).err(), Some(MenuError::UnknownNode));
    }

    #[test]
    fn test_select_resolves_targets() {
        let mut panel = panel();
        let mut ctx = Ctx::default();
        let mut tree: MenuTree<Ctx> = MenuTree::new("root").unwrap();
        let root = tree.root();
        let sub = tree.add_submenu(root, "Sub").unwrap();
        let back = tree
            .add_child(sub, "Back", Some(Action::navigate(Target::Grandparent)))
            .unwrap();
        let up = tree
            .add_child(sub, "Up", Some(Action::navigate(Target::Parent)))
            .unwrap();
        let quit = tree
            .add_child(root, "Quit", Some(Action::navigate(Target::Quit)))
            .unwrap();
        let inert = tree.add_child(root, "Inert", None).unwrap();

        assert_eq!(tree.select(sub, &mut panel, &mut ctx), Ok(Selection::Enter(sub)));
        assert_eq!(tree.select(back, &mut panel, &mut ctx), Ok(Selection::Enter(root)));
        assert_eq!(tree.select(up, &mut panel, &mut ctx), Ok(Selection::Enter(sub)));
        assert_eq!(tree.select(quit, &mut panel, &mut ctx), Ok(Selection::Quit));
        assert_eq!(tree.select(inert, &mut panel, &mut ctx), Ok(Selection::Stay));

        // Root has no grandparent
        let top = tree
            .add_child(root, "Top", Some(Action::navigate(Target::Grandparent)))
            .unwrap();
        assert_eq!(tree.select(top, &mut panel, &mut ctx), Ok(Selection::Stay));

        // Action survives invocation
        assert!(tree.node(sub).unwrap().action().is_some());
    }

    #[test]
    fn test_guard_notice_then_navigates() {
        fn refuse(ctx: &mut Ctx) -> Result<(), Notice> {
            ctx.guarded += 1;
            Err(Notice::error("End before begin"))
        }

        let mut panel = panel();
        let mut ctx = Ctx::default();
        let mut tree: MenuTree<Ctx> = MenuTree::new("root").unwrap();
        let root = tree.root();
        let sub = tree.add_submenu(root, "Sub").unwrap();
        let back = tree
            .add_child(sub, "Back", Some(Action::guarded(Target::Grandparent, refuse)))
            .unwrap();

        panel.io_mut().script(SELECT, &[0, 1]);
        assert_eq!(tree.select(back, &mut panel, &mut ctx), Ok(Selection::Enter(root)));
        assert_eq!(ctx.guarded, 1);
        assert_eq!(panel.io().screen(TEXT)[1], "End before begin");
    }

    #[test]
    fn test_activate_uses_selection() {
        let mut panel = panel();
        let mut ctx = Ctx::default();
        let mut tree: MenuTree<Ctx> = MenuTree::new("root").unwrap();
        let root = tree.root();
        let first = tree.add_submenu(root, "First").unwrap();
        let second = tree.add_submenu(root, "Second").unwrap();

        assert_eq!(tree.activate(root, &mut panel, &mut ctx), Ok(Selection::Enter(first)));
        tree.down(root).unwrap();
        assert_eq!(tree.activate(root, &mut panel, &mut ctx), Ok(Selection::Enter(second)));
        assert_eq!(tree.activate(second, &mut panel, &mut ctx), Ok(Selection::Stay));
    }
}
